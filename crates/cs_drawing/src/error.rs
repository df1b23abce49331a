use thiserror::Error;

/// 颜色解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    #[error("color must have exactly 6 hex digits: {0:?}")]
    InvalidLength(String),

    #[error("invalid hex digit in color: {0:?}")]
    InvalidDigit(String),
}

/// 绘图核心错误
#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("Invalid color: {0}")]
    Color(#[from] ColorError),

    #[error("Invalid raster size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Raster size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
