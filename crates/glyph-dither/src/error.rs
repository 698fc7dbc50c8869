//! Unified error type for the glyph-dither public API.
//!
//! Only conditions that would silently corrupt output are surfaced here.
//! Unknown algorithm or character set names and empty custom palettes are
//! recovered locally with documented defaults and never reach this type.

use std::fmt;

use crate::palette::PaletteError;

/// Unified error type for the glyph-dither public API.
#[derive(Debug, Clone, PartialEq)]
pub enum DitherError {
    /// Zero-area image or a column count below one.
    InvalidDimensions {
        /// Source width in pixels
        width: usize,
        /// Source height in pixels
        height: usize,
        /// Requested column count
        cols: usize,
    },
    /// A buffer whose length disagrees with its declared dimensions.
    BufferSizeMismatch {
        /// Length implied by the declared dimensions
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
    /// Two grids that must cover the same cells do not.
    GridSizeMismatch {
        /// `(cols, rows)` of the reference grid
        expected: (usize, usize),
        /// `(cols, rows)` of the grid supplied
        actual: (usize, usize),
    },
    /// A palette index that addresses no palette color.
    IndexOutOfRange {
        /// The offending index
        index: u8,
        /// Colors in the palette
        palette_len: usize,
    },
    /// Palette validation error.
    Palette(PaletteError),
}

impl fmt::Display for DitherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherError::InvalidDimensions {
                width,
                height,
                cols,
            } => write!(
                f,
                "invalid dimensions: {}x{} image at {} columns",
                width, height, cols
            ),
            DitherError::BufferSizeMismatch { expected, actual } => write!(
                f,
                "buffer size mismatch: expected {} values, got {}",
                expected, actual
            ),
            DitherError::GridSizeMismatch { expected, actual } => write!(
                f,
                "grid size mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            DitherError::IndexOutOfRange { index, palette_len } => write!(
                f,
                "palette index {} out of range for {} colors",
                index, palette_len
            ),
            DitherError::Palette(err) => write!(f, "palette error: {}", err),
        }
    }
}

impl std::error::Error for DitherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DitherError::Palette(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for DitherError {
    fn from(err: PaletteError) -> Self {
        DitherError::Palette(err)
    }
}
