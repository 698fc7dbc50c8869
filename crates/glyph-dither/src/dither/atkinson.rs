//! Atkinson error diffusion dithering algorithm.
//!
//! Atkinson dithering distributes only 75% of the quantization error (6/8).
//! The dropped quarter is never recovered, which is what gives the classic
//! Macintosh look its lighter, higher-contrast texture.

use crate::downsample::SampleGrid;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, IndexGrid, ATKINSON};

/// Atkinson error diffusion.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Each neighbor receives 1/8 of the error, for a total of 6/8.
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither(&self, grid: SampleGrid, palette: &Palette) -> IndexGrid {
        dither_with_kernel(grid, palette, &ATKINSON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::dither::FloydSteinberg;

    fn white_ratio(result: &IndexGrid) -> f32 {
        let white = result.indices().iter().filter(|&&x| x == 1).count();
        white as f32 / result.len() as f32
    }

    #[test]
    fn test_exact_colors_pass_through() {
        let palette = Palette::black_and_white();
        let black = Atkinson.dither(SampleGrid::filled(3, 3, Rgb::BLACK), &palette);
        assert!(black.indices().iter().all(|&x| x == 0));
        let white = Atkinson.dither(SampleGrid::filled(3, 3, Rgb::WHITE), &palette);
        assert!(white.indices().iter().all(|&x| x == 1));
    }

    #[test]
    fn test_small_per_neighbor_share() {
        // Single row of 100: each neighbor only receives 1/8 of the error,
        // so no cell climbs past the midpoint. Floyd-Steinberg's 7/16 would
        // push the second cell to white.
        let palette = Palette::black_and_white();
        let mut data = vec![0.0f32; 9];
        data[..3].copy_from_slice(&[100.0, 100.0, 100.0]);
        let grid = SampleGrid::new(data, 3, 1).unwrap();

        let result = Atkinson.dither(grid, &palette);
        assert_eq!(result.indices(), &[0, 0, 0]);
    }

    #[test]
    fn test_lost_error_lightens_highlights() {
        // Light gray: the dropped error makes Atkinson settle on more white
        // than the source level, Floyd-Steinberg tracks it closely.
        let palette = Palette::black_and_white();
        let level = 0.8 * 255.0;
        let grid = SampleGrid::filled(32, 32, Rgb::new(level, level, level));

        let atkinson = Atkinson.dither(grid.clone(), &palette);
        let floyd = FloydSteinberg.dither(grid, &palette);

        assert!(white_ratio(&atkinson) >= white_ratio(&floyd));
        assert!((white_ratio(&floyd) - 0.8).abs() < 0.05);
    }
}
