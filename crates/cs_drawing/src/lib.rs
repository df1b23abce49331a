pub mod color;
pub mod error;
pub mod fill;
pub mod history;
pub mod raster;
pub mod sticker;
pub mod stroke;
pub mod types;

pub use tiny_skia;

// 重新导出常用类型
pub use color::Rgba;
pub use error::{ColorError, DrawingError};
pub use fill::{DEFAULT_FILL_TOLERANCE, FillReport, flood_fill};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryFlags, HistoryManager};
pub use raster::{DEFAULT_CANVAS_SIZE, RasterLayer, RasterSnapshot};
pub use sticker::{ActiveGesture, Sticker, StickerConfig, StickerManager};
pub use stroke::{Compositing, LineStyle, StrokeOutcome, StrokeRenderer};
pub use types::{BrushRange, BrushStyle, PaintTool, Point, ToolState};
