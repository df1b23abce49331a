use tiny_skia::{IntSize, Pixmap, PixmapPaint, Transform};

use crate::color::Rgba;
use crate::error::DrawingError;

/// 默认画布边长（逻辑像素）
pub const DEFAULT_CANVAS_SIZE: u32 = 600;

/// 栅格图层
///
/// 内部使用 tiny_skia 的预乘 RGBA 像素，对外读取时返回非预乘颜色。
#[derive(Clone, Debug)]
pub struct RasterLayer {
    pixmap: Pixmap,
}

/// 图层像素的完整快照（历史记录项）
#[derive(Clone, Debug)]
pub struct RasterSnapshot {
    pixmap: Pixmap,
}

impl RasterSnapshot {
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }
}

impl PartialEq for RasterSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.pixmap.width() == other.pixmap.width()
            && self.pixmap.height() == other.pixmap.height()
            && self.pixmap.data() == other.pixmap.data()
    }
}

impl RasterLayer {
    /// 创建全透明图层
    pub fn new(width: u32, height: u32) -> Result<Self, DrawingError> {
        Pixmap::new(width, height)
            .map(|pixmap| Self { pixmap })
            .ok_or(DrawingError::InvalidSize { width, height })
    }

    /// 创建填充为指定颜色的图层
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self, DrawingError> {
        let mut layer = Self::new(width, height)?;
        layer.fill(color);
        Ok(layer)
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    /// 从非预乘 RGBA8 数据创建图层
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Self, DrawingError> {
        let size = IntSize::from_wh(width, height).ok_or(DrawingError::InvalidSize { width, height })?;
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(DrawingError::InvalidSize { width, height });
        }

        let premultiplied: Vec<u8> = rgba
            .chunks_exact(4)
            .flat_map(|px| {
                let p = tiny_skia::ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
                [p.red(), p.green(), p.blue(), p.alpha()]
            })
            .collect();

        Pixmap::from_vec(premultiplied, size)
            .map(|pixmap| Self { pixmap })
            .ok_or(DrawingError::InvalidSize { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// 读取像素（非预乘），越界返回 None
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap
            .pixel(x, y)
            .map(|p| Rgba::from_skia(p.demultiply()))
    }

    /// 写入像素，越界时忽略
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let index = (y * self.width() + x) as usize;
        self.pixmap.pixels_mut()[index] = color.to_skia().premultiply();
    }

    pub fn fill(&mut self, color: Rgba) {
        let c = color.to_skia();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(
            c.red(),
            c.green(),
            c.blue(),
            c.alpha(),
        ));
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// 预乘 RGBA 原始数据
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// 非预乘 RGBA 数据
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// 以 source-over 方式把另一图层叠加到本图层
    pub fn composite(&mut self, top: &RasterLayer) {
        self.pixmap.draw_pixmap(
            0,
            0,
            top.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// 拷贝全部像素作为快照
    pub fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot {
            pixmap: self.pixmap.clone(),
        }
    }

    /// 从快照恢复像素
    pub fn restore(&mut self, snapshot: &RasterSnapshot) -> Result<(), DrawingError> {
        let expected = (self.width(), self.height());
        let actual = (snapshot.pixmap.width(), snapshot.pixmap.height());
        if expected != actual {
            return Err(DrawingError::SizeMismatch { expected, actual });
        }
        self.pixmap
            .data_mut()
            .copy_from_slice(snapshot.pixmap.data());
        Ok(())
    }

    /// 像素是否与快照完全一致
    pub fn matches(&self, snapshot: &RasterSnapshot) -> bool {
        self.width() == snapshot.pixmap.width()
            && self.height() == snapshot.pixmap.height()
            && self.pixmap.data() == snapshot.pixmap.data()
    }

    /// 编码为 PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, DrawingError> {
        self.pixmap
            .encode_png()
            .map_err(|e| DrawingError::Encode(e.to_string()))
    }
}
