//! Sierra two-row error diffusion dithering algorithm.

use crate::downsample::SampleGrid;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, IndexGrid, SIERRA_TWO_ROW};

/// Sierra two-row error diffusion (100% propagation, 7 neighbors).
///
/// ```text
///            X   4   3
///    1   2   3   2   1
/// ```
///
/// The widest footprint of the supported kernels, reaching two cells to
/// either side on the next row.
pub struct Sierra;

impl Dither for Sierra {
    fn dither(&self, grid: SampleGrid, palette: &Palette) -> IndexGrid {
        dither_with_kernel(grid, palette, &SIERRA_TWO_ROW)
    }
}
