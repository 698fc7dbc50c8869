//! Bayer 4x4 ordered dithering.

use crate::color::Rgb;
use crate::downsample::SampleGrid;
use crate::palette::Palette;

use super::{Dither, IndexGrid};

/// 4x4 Bayer threshold matrix, values 0..16.
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Amplitude of the threshold offset on the 0..=255 scale.
pub const BAYER_SPREAD: f32 = 64.0;

/// Threshold offset for cell `(x, y)`, in `[-32, 28]`.
#[inline]
pub fn bayer_offset(x: usize, y: usize) -> f32 {
    (BAYER_4X4[y % 4][x % 4] as f32 / 16.0 - 0.5) * BAYER_SPREAD
}

/// Ordered dithering with a tiled 4x4 Bayer matrix.
///
/// Every channel of a cell is shifted by the same matrix-derived offset and
/// the result is matched against the palette. No state is carried between
/// cells, so the output depends only on the input sample and its
/// coordinates. The grid is consumed but not modified.
pub struct Bayer;

impl Dither for Bayer {
    fn dither(&self, grid: SampleGrid, palette: &Palette) -> IndexGrid {
        let (width, height) = (grid.width(), grid.height());
        let mut output = vec![0u8; grid.cells()];

        for y in 0..height {
            for x in 0..width {
                let sample = grid.at(x, y);
                let t = bayer_offset(x, y);
                let shifted = Rgb::new(sample.r + t, sample.g + t, sample.b + t);
                output[y * width + x] = palette.closest_index(shifted);
            }
        }

        IndexGrid::from_dithered(output, width, height)
    }
}
