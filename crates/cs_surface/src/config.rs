use std::path::PathBuf;

use cs_drawing::{
    BrushRange, BrushStyle, DEFAULT_CANVAS_SIZE, DEFAULT_FILL_TOLERANCE, DEFAULT_HISTORY_CAPACITY,
    PaintTool, Point, Rgba, StickerConfig, ToolState,
};
use cs_settings::Settings;

use crate::gallery::DEFAULT_GALLERY_LIMIT;

/// Host-provided surface configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub canvas_size: u32,
    /// Paint layer color under the outline.
    pub background: Rgba,
    pub history_capacity: usize,
    pub fill_tolerance: u8,
    /// Stroke widths are clamped into this range whatever the host passes.
    pub brush_range: BrushRange,
    /// Initial tool selection for a host toolbar.
    pub default_tools: ToolState,
    pub stickers: StickerConfig,
    /// `None` disables the gallery side effect of saving.
    pub gallery_path: Option<PathBuf>,
    pub gallery_limit: usize,
    /// `None` disables the download side effect of saving.
    pub downloads_dir: Option<PathBuf>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            background: Rgba::WHITE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            fill_tolerance: DEFAULT_FILL_TOLERANCE,
            brush_range: BrushRange::default(),
            default_tools: ToolState::default(),
            stickers: StickerConfig::centered(DEFAULT_CANVAS_SIZE),
            gallery_path: None,
            gallery_limit: DEFAULT_GALLERY_LIMIT,
            downloads_dir: None,
        }
    }
}

impl From<&Settings> for SurfaceConfig {
    fn from(settings: &Settings) -> Self {
        let settings = settings.clone().sanitized();
        let background = Rgba::parse_hex(&settings.background_color).unwrap_or_else(|e| {
            log::warn!("invalid background color in settings, using white: {e}");
            Rgba::WHITE
        });
        let center = settings.canvas_size as f32 / 2.0;
        let brush_range = BrushRange::new(settings.min_brush_size, settings.max_brush_size);
        let default_tools = ToolState::new(
            PaintTool::Brush,
            settings.brush_color.clone(),
            settings.brush_size,
            BrushStyle::Round,
        )
        .with_size_in(settings.brush_size, brush_range);

        Self {
            canvas_size: settings.canvas_size,
            background,
            history_capacity: settings.history_capacity,
            fill_tolerance: settings.fill_tolerance,
            brush_range,
            default_tools,
            stickers: StickerConfig {
                default_position: Point::new(center, center),
                default_size: settings.sticker_default_size,
                min_size: settings.sticker_min_size,
                max_size: settings.sticker_max_size,
                resize_divisor: settings.sticker_resize_divisor,
            }
            .sanitized(),
            gallery_path: settings.gallery_path.clone(),
            gallery_limit: settings.gallery_limit,
            downloads_dir: settings.downloads_dir.clone(),
        }
    }
}
