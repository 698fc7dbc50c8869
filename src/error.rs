use glyph_dither::{DitherError, PaletteError, ParseColorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Unsupported PNG format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render task failed: {0}")]
    TaskFailed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid color in {field}: {source}")]
    InvalidColor {
        field: &'static str,
        #[source]
        source: ParseColorError,
    },

    #[error("Invalid custom palette: {0}")]
    Palette(#[from] PaletteError),
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Worker is not running")]
    Closed,

    #[error("Dither task failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Dither(#[from] DitherError),
}
