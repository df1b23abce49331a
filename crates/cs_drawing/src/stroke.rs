use tiny_skia::{
    BlendMode, Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    StrokeDash, Transform,
};

use crate::color::Rgba;
use crate::raster::{RasterLayer, RasterSnapshot};
use crate::types::{BrushRange, BrushStyle, PaintTool, Point, ToolState};

/// 记号笔透明度
pub const MARKER_ALPHA: f32 = 0.4;
/// 橡皮擦宽度倍数
pub const ERASER_WIDTH_FACTOR: f32 = 2.0;

/// 合成模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compositing {
    /// source-over
    #[default]
    Normal,
    /// destination-out，擦除为透明
    Erase,
}

impl Compositing {
    fn blend_mode(self) -> BlendMode {
        match self {
            Compositing::Normal => BlendMode::SourceOver,
            Compositing::Erase => BlendMode::DestinationOut,
        }
    }
}

/// 单段线条的绘制参数
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub alpha: f32,
    /// 虚线间隔（实线为 None）
    pub dash: Option<[f32; 2]>,
    pub compositing: Compositing,
}

impl LineStyle {
    /// 画笔样式对应的线条参数
    pub fn for_brush(style: Option<BrushStyle>, size: f32) -> Self {
        let (cap, join, alpha, dash) = match style {
            Some(BrushStyle::Square) => (LineCap::Butt, LineJoin::Miter, 1.0, None),
            Some(BrushStyle::Marker) => (LineCap::Round, LineJoin::Round, MARKER_ALPHA, None),
            Some(BrushStyle::Calligraphy) => {
                (LineCap::Butt, LineJoin::Bevel, 1.0, Some([size * 2.0, size]))
            }
            Some(BrushStyle::Round) | None => (LineCap::Round, LineJoin::Round, 1.0, None),
        };
        Self {
            width: size,
            cap,
            join,
            alpha,
            dash,
            compositing: Compositing::Normal,
        }
    }

    /// 橡皮擦：双倍宽度、圆头、destination-out
    pub fn for_eraser(size: f32) -> Self {
        Self {
            width: size * ERASER_WIDTH_FACTOR,
            cap: LineCap::Round,
            join: LineJoin::Round,
            alpha: 1.0,
            dash: None,
            compositing: Compositing::Erase,
        }
    }

    /// 虚线一个周期的长度
    pub fn dash_period(&self) -> Option<f32> {
        self.dash.map(|[on, off]| on + off).filter(|p| *p > 0.0)
    }

    fn opacity(&self) -> f32 {
        self.alpha.clamp(0.0, 1.0)
    }

    fn to_stroke(&self) -> Stroke {
        Stroke {
            width: self.width,
            line_cap: self.cap,
            line_join: self.join,
            ..Stroke::default()
        }
    }

    /// `phase` 为本段起点在虚线周期中的位置
    fn to_dash(&self, phase: f32) -> Option<StrokeDash> {
        let [on, off] = self.dash?;
        StrokeDash::new(vec![on, off], phase)
    }
}

/// 单次笔画的覆盖缓冲
///
/// 线段以不透明方式累积到 `coverage`，每次更新时先从 `base` 恢复图层，再按样式透明度
/// 整体合成一次。线段之间的重叠因此不会叠加变深。
#[derive(Debug)]
struct StrokeBuffer {
    base: RasterSnapshot,
    coverage: Pixmap,
    compositing: Compositing,
    opacity: f32,
}

impl StrokeBuffer {
    fn new(layer: &RasterLayer, style: &LineStyle) -> Option<Self> {
        Some(Self {
            base: layer.snapshot(),
            coverage: Pixmap::new(layer.width(), layer.height())?,
            compositing: style.compositing,
            opacity: style.opacity(),
        })
    }

    fn fits(&self, layer: &RasterLayer) -> bool {
        self.coverage.width() == layer.width() && self.coverage.height() == layer.height()
    }

    fn accepts(&self, style: &LineStyle) -> bool {
        self.compositing == style.compositing && self.opacity == style.opacity()
    }

    /// 合成参数变化（如笔画中途切换工具）时，把已画内容固定到底图
    fn rebase(&mut self, layer: &RasterLayer, style: &LineStyle) {
        self.base = layer.snapshot();
        self.coverage.fill(Color::TRANSPARENT);
        self.compositing = style.compositing;
        self.opacity = style.opacity();
    }

    fn present(&self, layer: &mut RasterLayer) {
        if let Err(e) = layer.restore(&self.base) {
            log::warn!("stroke buffer out of sync: {e}");
            return;
        }
        let paint = PixmapPaint {
            opacity: self.opacity,
            blend_mode: self.compositing.blend_mode(),
            ..PixmapPaint::default()
        };
        layer.pixmap_mut().draw_pixmap(
            0,
            0,
            self.coverage.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
    }
}

/// 进行中的笔画
#[derive(Debug)]
struct StrokeSession {
    last: Point,
    segments: usize,
    /// 已走过的路径长度，用于延续虚线相位
    distance: f32,
    buffer: Option<StrokeBuffer>,
}

/// 笔画结束时的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeOutcome {
    /// 是否存在进行中的笔画
    pub was_active: bool,
    /// 实际绘制的线段数
    pub segments: usize,
}

/// 画笔/橡皮擦笔画渲染器
#[derive(Debug, Default)]
pub struct StrokeRenderer {
    session: Option<StrokeSession>,
    compositing: Compositing,
    size_range: BrushRange,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用配置的画笔尺寸范围
    pub fn with_size_range(size_range: BrushRange) -> Self {
        Self {
            size_range,
            ..Self::default()
        }
    }

    pub fn size_range(&self) -> BrushRange {
        self.size_range
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// 当前合成模式
    pub fn compositing(&self) -> Compositing {
        self.compositing
    }

    /// 开始笔画
    ///
    /// 总是先把合成模式恢复为 source-over，避免上一次橡皮擦残留。
    pub fn begin(&mut self, pos: Point) {
        self.compositing = Compositing::Normal;
        self.session = Some(StrokeSession {
            last: pos,
            segments: 0,
            distance: 0.0,
            buffer: None,
        });
    }

    /// 延续笔画，绘制一段线段到 `pos`
    ///
    /// 返回是否实际绘制了线段。
    pub fn extend(&mut self, layer: &mut RasterLayer, pos: Point, tools: &ToolState) -> bool {
        let size = self.size_range.clamp(tools.size);
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let (style, color) = match tools.tool {
            PaintTool::Eraser => (LineStyle::for_eraser(size), Rgba::BLACK),
            PaintTool::Brush => match Rgba::parse_hex(&tools.color) {
                Ok(color) => (LineStyle::for_brush(tools.style, size), color),
                Err(e) => {
                    log::debug!("skip stroke segment: {e}");
                    return false;
                }
            },
            _ => return false,
        };
        self.compositing = style.compositing;

        let from = session.last;
        if from == pos {
            return false;
        }
        session.last = pos;
        let phase = style
            .dash_period()
            .map_or(0.0, |period| session.distance % period);
        session.distance += from.distance_to(pos);

        if !session.buffer.as_ref().is_some_and(|b| b.fits(layer)) {
            session.buffer = StrokeBuffer::new(layer, &style);
        }
        let Some(buffer) = session.buffer.as_mut() else {
            return false;
        };
        if !buffer.accepts(&style) {
            buffer.rebase(layer, &style);
        }

        if !stroke_coverage(&mut buffer.coverage, from, pos, &style, color, phase) {
            return false;
        }
        buffer.present(layer);
        session.segments += 1;
        true
    }

    /// 结束笔画
    pub fn end(&mut self) -> StrokeOutcome {
        match self.session.take() {
            Some(session) => StrokeOutcome {
                was_active: true,
                segments: session.segments,
            },
            None => StrokeOutcome::default(),
        }
    }
}

/// 以不透明方式把一段线条画进覆盖缓冲
///
/// 整段落在虚线间隔内时什么也不画，但仍算作有效线段。
fn stroke_coverage(
    coverage: &mut Pixmap,
    from: Point,
    to: Point,
    style: &LineStyle,
    color: Rgba,
    phase: f32,
) -> bool {
    if !style.width.is_finite() || style.width <= 0.0 {
        return false;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    let Some(mut path) = pb.finish() else {
        return false;
    };
    if let Some(dash) = style.to_dash(phase) {
        match path.dash(&dash, 1.0) {
            Some(dashed) => path = dashed,
            None => return true,
        }
    }

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;

    coverage.stroke_path(&path, &paint, &style.to_stroke(), Transform::identity(), None);
    true
}
