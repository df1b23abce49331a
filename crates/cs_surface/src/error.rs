use cs_drawing::{ColorError, DrawingError};
use thiserror::Error;

/// Surface-level errors.
///
/// Only artwork loading and export helpers return these; pointer and history
/// operations never fail towards the host.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Drawing error: {0}")]
    Drawing(#[from] DrawingError),

    #[error("Invalid color: {0}")]
    Color(#[from] ColorError),

    #[error("SVG parse failed: {0}")]
    Svg(#[from] usvg::Error),

    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Outline fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Outline markup is not valid UTF-8")]
    NotUtf8,

    #[error("Outline has no drawable size")]
    EmptyOutline,

    #[error("Invalid data URL")]
    InvalidDataUrl,

    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Persistence (gallery / download) errors.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Gallery file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;
