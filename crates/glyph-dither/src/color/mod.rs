//! Color types for the glyph pipeline.
//!
//! All pipeline arithmetic happens on [`Rgb`] values in the 0..=255 scale.
//! Channels are deliberately left unclamped so that accumulated
//! quantization error can push a sample outside the displayable range.

mod rgb;

pub use rgb::{luminance, Rgb};
