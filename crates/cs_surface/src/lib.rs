pub mod artwork;
pub mod config;
pub mod error;
pub mod export;
pub mod gallery;
pub mod host;
pub mod interaction;
pub mod loader;
pub mod surface;

// Re-export core types for convenience.
pub use cs_drawing::{
    BrushStyle, HistoryFlags, PaintTool, Point, RasterLayer, Rgba, Sticker, ToolState,
};
pub use cs_settings::Settings;

pub use artwork::{Artwork, DecodedOutline, Outline};
pub use config::SurfaceConfig;
pub use error::{GalleryError, SurfaceError, SurfaceResult};
pub use gallery::{DownloadFolder, Gallery, SavedArtwork};
pub use host::{NullHost, SoundCue, SurfaceHost};
pub use loader::OutlineLoader;
pub use surface::{LoadTicket, PaintingSurface, SurfacePhase};
