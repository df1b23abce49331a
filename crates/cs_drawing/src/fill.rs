//! 油漆桶填充
//!
//! 显式栈的 4 邻域泛洪填充。候选像素需要同时满足：四个通道都在起点原始颜色的容差内，
//! 且不等于已经完全不透明的目标颜色。后一条保证已填充区域不会被重复访问。

use crate::color::Rgba;
use crate::raster::RasterLayer;

/// 默认填充容差
pub const DEFAULT_FILL_TOLERANCE: u8 = 32;

/// 一次填充的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    /// 被修改的像素数
    pub filled: usize,
}

impl FillReport {
    pub fn changed(&self) -> bool {
        self.filled > 0
    }
}

/// 从 (x, y) 开始填充
///
/// 坐标向下取整；起点越界或完全透明时不做任何修改。
pub fn flood_fill(
    layer: &mut RasterLayer,
    x: f32,
    y: f32,
    fill_color: Rgba,
    tolerance: u8,
) -> FillReport {
    if !x.is_finite() || !y.is_finite() {
        return FillReport::default();
    }
    let (start_x, start_y) = (x.floor() as i64, y.floor() as i64);
    if !layer.contains(start_x, start_y) {
        return FillReport::default();
    }

    let width = layer.width() as i64;
    let height = layer.height() as i64;
    let target = Rgba::opaque(fill_color.r, fill_color.g, fill_color.b);
    let target_px = target.to_skia().premultiply();

    let pixels = layer.pixmap_mut().pixels_mut();
    let start_color = Rgba::from_skia(pixels[(start_y * width + start_x) as usize].demultiply());
    if start_color.is_transparent() {
        return FillReport::default();
    }

    let mut filled = 0usize;
    let mut stack: Vec<(i64, i64)> = vec![(start_x, start_y)];

    while let Some((cx, cy)) = stack.pop() {
        if cx < 0 || cy < 0 || cx >= width || cy >= height {
            continue;
        }
        let index = (cy * width + cx) as usize;
        let current = Rgba::from_skia(pixels[index].demultiply());

        if current == target || !current.within_tolerance(&start_color, tolerance) {
            continue;
        }

        pixels[index] = target_px;
        filled += 1;

        stack.push((cx + 1, cy));
        stack.push((cx - 1, cy));
        stack.push((cx, cy + 1));
        stack.push((cx, cy - 1));
    }

    log::trace!(
        "flood fill at ({start_x}, {start_y}) with {} tol={tolerance}: {filled} px",
        target.to_hex()
    );

    FillReport { filled }
}
