use serde::{Deserialize, Serialize};

/// 画笔尺寸下限（与宿主工具栏一致）
pub const MIN_BRUSH_SIZE: f32 = 2.0;
/// 画笔尺寸上限
pub const MAX_BRUSH_SIZE: f32 = 60.0;
/// 默认画笔尺寸
pub const DEFAULT_BRUSH_SIZE: f32 = 10.0;

/// 画布上的坐标（设备无关像素）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn distance_to(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// 画笔尺寸范围
///
/// 边界在构造时修正，`clamp` 不会因为上下颠倒或 NaN 而 panic。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRange {
    min: f32,
    max: f32,
}

impl Default for BrushRange {
    fn default() -> Self {
        Self {
            min: MIN_BRUSH_SIZE,
            max: MAX_BRUSH_SIZE,
        }
    }
}

impl BrushRange {
    /// 颠倒的边界会被交换；非有限或非正的边界退回默认范围
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        if !min.is_finite() || !max.is_finite() || min <= 0.0 {
            return Self::default();
        }
        Self { min, max }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn clamp(&self, size: f32) -> f32 {
        if size.is_nan() {
            return self.min;
        }
        size.clamp(self.min, self.max)
    }
}

/// 绘图工具类型
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintTool {
    /// 画笔
    #[default]
    Brush,
    /// 橡皮擦
    Eraser,
    /// 油漆桶
    Fill,
    /// 贴纸
    Sticker,
    /// 文本（占位，不影响栅格）
    Text,
    /// 特效（占位，不影响栅格）
    Fx,
}

impl PaintTool {
    /// 是否是连续笔画工具
    pub fn is_stroke(&self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }

    /// 是否会修改栅格
    pub fn touches_raster(&self) -> bool {
        matches!(self, Self::Brush | Self::Eraser | Self::Fill)
    }
}

/// 画笔样式
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushStyle {
    #[default]
    Round,
    Square,
    Marker,
    Calligraphy,
}

impl BrushStyle {
    /// 从宿主传入的名称解析，未知名称返回 None
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "round" => Some(Self::Round),
            "square" => Some(Self::Square),
            "marker" => Some(Self::Marker),
            "calligraphy" => Some(Self::Calligraphy),
            _ => None,
        }
    }
}

/// 宿主当前的工具选择
///
/// 每次指针事件都由宿主传入最新值，笔画进行中切换颜色/尺寸会立即生效。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub tool: PaintTool,
    /// `#RRGGBB`
    pub color: String,
    pub size: f32,
    /// 未设置时按 round 参数绘制
    pub style: Option<BrushStyle>,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: PaintTool::Brush,
            color: "#FF0000".to_string(),
            size: DEFAULT_BRUSH_SIZE,
            style: Some(BrushStyle::Round),
        }
    }
}

impl ToolState {
    pub fn new(tool: PaintTool, color: impl Into<String>, size: f32, style: BrushStyle) -> Self {
        Self {
            tool,
            color: color.into(),
            size: BrushRange::default().clamp(size),
            style: Some(style),
        }
    }

    pub fn with_tool(mut self, tool: PaintTool) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// 设置尺寸（限制在有效范围内）
    pub fn with_size(self, size: f32) -> Self {
        self.with_size_in(size, BrushRange::default())
    }

    /// 按给定范围设置尺寸
    pub fn with_size_in(mut self, size: f32, range: BrushRange) -> Self {
        self.size = range.clamp(size);
        self
    }

    pub fn with_style(mut self, style: Option<BrushStyle>) -> Self {
        self.style = style;
        self
    }
}
