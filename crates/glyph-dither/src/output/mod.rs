//! Output types for the glyph pipeline.
//!
//! [`DitherResult`] is the immutable product of one run: text rows, the
//! palette index of every cell and the palette snapshot the indices refer
//! to. [`build_result`] assembles it from a dithered [`IndexGrid`](crate::IndexGrid).

mod dither_result;

pub use dither_result::{build_result, Cell, DitherResult};
