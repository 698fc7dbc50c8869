//! Hex color and palette validation errors.

use std::fmt;
use std::num::ParseIntError;

use super::MAX_PALETTE_LEN;

/// A hex color string that is not `RGB` or `RRGGBB`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Wrong digit count, or non-ASCII input
    InvalidLength,
    /// A digit outside `0-9a-fA-F`
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        Self::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => f.write_str("expected #RGB or #RRGGBB"),
            Self::InvalidHex(err) => write!(f, "bad hex digit ({err})"),
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHex(err) => Some(err),
            Self::InvalidLength => None,
        }
    }
}

/// Error type for palette validation.
///
/// `EmptyPalette` is only ever observed by code that builds a [`Palette`]
/// directly; mode resolution recovers from it with the 1-bit fallback.
///
/// [`Palette`]: super::Palette
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// Zero colors
    EmptyPalette,
    /// More colors than a `u8` index can address
    TooManyColors {
        /// Number of colors supplied
        len: usize,
    },
    /// An entry of a hex list failed to parse
    ParseColor {
        /// Index of the offending entry
        index: usize,
        /// Underlying parse error
        source: ParseColorError,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPalette => f.write_str("palette has no colors"),
            Self::TooManyColors { len } => {
                write!(f, "palette has {len} colors, the limit is {MAX_PALETTE_LEN}")
            }
            Self::ParseColor { index, source } => write!(f, "palette entry {index}: {source}"),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ParseColor { source, .. } => Some(source),
            _ => None,
        }
    }
}
