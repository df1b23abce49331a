use cs_drawing::{DrawingError, RasterLayer};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::{SurfaceError, SurfaceResult};

/// 线稿来源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Outline {
    /// 内联 SVG 标记
    Svg(String),
    /// 位图地址（http(s) URL 或本地路径）
    Image(String),
}

/// 作品描述（由宿主的内容目录提供，只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 参考图（仅供宿主并排显示）
    #[serde(default)]
    pub reference_image: Option<String>,
    pub outline: Outline,
}

impl Artwork {
    pub fn new(id: impl Into<String>, title: impl Into<String>, outline: Outline) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            difficulty: String::new(),
            tags: Vec::new(),
            reference_image: None,
            outline,
        }
    }

    /// 从宿主目录 JSON 解析作品列表
    pub fn catalog_from_json(json: &str) -> serde_json::Result<Vec<Artwork>> {
        serde_json::from_str(json)
    }
}

/// 已取回、待栅格化的线稿
#[derive(Debug, Clone)]
pub enum DecodedOutline {
    Svg(String),
    /// 编码后的位图（PNG/JPEG 等）
    Encoded(Vec<u8>),
    /// 已经是画布尺寸的像素
    Pixels(RasterLayer),
}

impl DecodedOutline {
    /// 按内容判断是 SVG 还是位图
    pub fn from_bytes(bytes: Vec<u8>) -> SurfaceResult<Self> {
        let head = &bytes[..bytes.len().min(512)];
        let looks_like_svg = head
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .is_some_and(|start| head[start] == b'<')
            && String::from_utf8_lossy(head).contains("<svg");

        if looks_like_svg {
            String::from_utf8(bytes)
                .map(DecodedOutline::Svg)
                .map_err(|_| SurfaceError::NotUtf8)
        } else {
            Ok(DecodedOutline::Encoded(bytes))
        }
    }
}

/// 把线稿栅格化为 `size`×`size` 的边界图层（透明背景）
pub fn rasterize_outline(outline: DecodedOutline, size: u32) -> SurfaceResult<RasterLayer> {
    match outline {
        DecodedOutline::Svg(markup) => rasterize_svg(&markup, size),
        DecodedOutline::Encoded(bytes) => rasterize_image(&bytes, size),
        DecodedOutline::Pixels(layer) => {
            if layer.width() != size || layer.height() != size {
                return Err(DrawingError::SizeMismatch {
                    expected: (size, size),
                    actual: (layer.width(), layer.height()),
                }
                .into());
            }
            Ok(layer)
        }
    }
}

/// SVG 等比缩放并居中
fn rasterize_svg(markup: &str, size: u32) -> SurfaceResult<RasterLayer> {
    let tree = usvg::Tree::from_str(markup, &usvg::Options::default())?;
    let svg_size = tree.size();
    if svg_size.width() <= 0.0 || svg_size.height() <= 0.0 {
        return Err(SurfaceError::EmptyOutline);
    }

    let mut layer = RasterLayer::new(size, size)?;
    let scale = (size as f32 / svg_size.width()).min(size as f32 / svg_size.height());
    let tx = (size as f32 - svg_size.width() * scale) / 2.0;
    let ty = (size as f32 - svg_size.height() * scale) / 2.0;
    let transform = tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, tx, ty);

    resvg::render(&tree, transform, &mut layer.pixmap_mut().as_mut());
    Ok(layer)
}

/// 位图拉伸到画布尺寸
fn rasterize_image(bytes: &[u8], size: u32) -> SurfaceResult<RasterLayer> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(SurfaceError::EmptyOutline);
    }
    let rgba = if decoded.width() == size && decoded.height() == size {
        decoded
    } else {
        image::imageops::resize(&decoded, size, size, FilterType::Triangle)
    };
    Ok(RasterLayer::from_rgba8(size, size, rgba.as_raw())?)
}

#[cfg(test)]
mod tests {
    use cs_drawing::Rgba;

    use super::*;

    const SQUARE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <rect x="10" y="10" width="80" height="80" fill="none" stroke="black" stroke-width="4"/>
    </svg>"#;

    #[test]
    fn test_svg_scaled_to_canvas() {
        let layer = rasterize_outline(DecodedOutline::Svg(SQUARE_SVG.into()), 200).unwrap();
        assert_eq!(layer.width(), 200);
        // 线条在 x=20（缩放 2 倍）处
        assert_eq!(layer.pixel(20, 100).map(|c| c.a), Some(255));
        assert_eq!(layer.pixel(100, 100), Some(Rgba::TRANSPARENT));
        assert_eq!(layer.pixel(2, 2), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_invalid_svg_is_error() {
        let result = rasterize_outline(DecodedOutline::Svg("<svg".into()), 50);
        assert!(matches!(result, Err(SurfaceError::Svg(_))));
    }

    #[test]
    fn test_encoded_png_is_stretched() {
        let source = RasterLayer::filled(10, 10, Rgba::BLACK).unwrap();
        let png = source.encode_png().unwrap();
        let layer = rasterize_outline(DecodedOutline::Encoded(png), 40).unwrap();
        assert_eq!((layer.width(), layer.height()), (40, 40));
        assert_eq!(layer.pixel(20, 20), Some(Rgba::BLACK));
    }

    #[test]
    fn test_pixels_size_must_match() {
        let layer = RasterLayer::new(10, 10).unwrap();
        assert!(rasterize_outline(DecodedOutline::Pixels(layer), 20).is_err());
    }

    #[test]
    fn test_from_bytes_detects_svg() {
        let svg = DecodedOutline::from_bytes(format!("\n  {SQUARE_SVG}").into_bytes()).unwrap();
        assert!(matches!(svg, DecodedOutline::Svg(_)));

        let png = RasterLayer::new(2, 2).unwrap().encode_png().unwrap();
        assert!(matches!(
            DecodedOutline::from_bytes(png).unwrap(),
            DecodedOutline::Encoded(_)
        ));
    }

    #[test]
    fn test_catalog_json() {
        let json = r#"[
            {"id": "cat", "title": "Cat", "category": "animals", "tags": ["easy"],
             "outline": {"kind": "svg", "value": "<svg/>"}},
            {"id": "car", "title": "Car", "outline": {"kind": "image", "value": "https://example.com/car.png"}}
        ]"#;
        let catalog = Artwork::catalog_from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].tags, vec!["easy".to_string()]);
        assert_eq!(
            catalog[1].outline,
            Outline::Image("https://example.com/car.png".into())
        );
    }
}
