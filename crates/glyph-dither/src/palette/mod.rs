//! Palette types and utilities
//!
//! This module provides the ordered [`Palette`] with nearest-color matching,
//! the fixed bit-depth palettes selected by [`PaletteMode`], and the error
//! types for parsing and validation.

mod error;
mod mode;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use mode::PaletteMode;
pub use palette::{parse_hex_list, Palette};

/// Largest palette addressable by a `u8` index.
pub const MAX_PALETTE_LEN: usize = 256;
