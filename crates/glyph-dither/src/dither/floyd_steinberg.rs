//! Floyd-Steinberg error diffusion dithering algorithm.

use crate::downsample::SampleGrid;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, IndexGrid, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion.
///
/// Hands 100% of the quantization error to four neighbors:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// This is also the fallback for unrecognized algorithm names.
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, grid: SampleGrid, palette: &Palette) -> IndexGrid {
        dither_with_kernel(grid, palette, &FLOYD_STEINBERG)
    }
}
