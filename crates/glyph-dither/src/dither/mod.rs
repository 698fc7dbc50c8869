//! Dithering algorithms.
//!
//! Three error diffusion kernels and one ordered (threshold) ditherer turn a
//! [`SampleGrid`] into an [`IndexGrid`] of palette indices.
//!
//! # Algorithms
//!
//! - **Floyd-Steinberg**: 4 neighbors, 100% propagation (default and fallback)
//! - **Atkinson**: 6 neighbors, 75% propagation
//! - **Sierra**: two-row kernel, 7 neighbors, 100% propagation
//! - **Bayer**: 4x4 ordered threshold, no propagation
//!
//! # Architecture
//!
//! All algorithms implement the [`Dither`] trait. Each one takes ownership of
//! the grid: error diffusion mutates it in place while scanning left to
//! right, top to bottom, so callers that need the undithered samples clone
//! the grid before handing it over.
//!
//! # Example
//!
//! ```
//! use glyph_dither::{DitherAlgorithm, Palette, Rgb, SampleGrid};
//!
//! let palette = Palette::black_and_white();
//! let grid = SampleGrid::filled(4, 4, Rgb::new(128.0, 128.0, 128.0));
//!
//! let indices = DitherAlgorithm::Atkinson.apply(grid, &palette);
//! assert_eq!(indices.len(), 16);
//! ```

mod atkinson;
mod bayer;
mod floyd_steinberg;
mod kernel;
mod sierra;

use std::fmt;

pub use atkinson::Atkinson;
pub use bayer::{bayer_offset, Bayer, BAYER_4X4, BAYER_SPREAD};
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::*;
pub use sierra::Sierra;

use crate::color::Rgb;
use crate::downsample::SampleGrid;
use crate::error::DitherError;
use crate::palette::Palette;

/// Dither algorithm selection.
///
/// Names are matched case-insensitively by [`from_name`](Self::from_name);
/// any name that is not recognized selects Floyd-Steinberg so that settings
/// written by newer versions still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherAlgorithm {
    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,
    /// Atkinson error diffusion (75% propagation).
    Atkinson,
    /// Sierra two-row error diffusion.
    Sierra,
    /// Bayer 4x4 ordered dithering.
    Bayer,
}

impl DitherAlgorithm {
    /// Every algorithm, in display order.
    pub const ALL: [DitherAlgorithm; 4] = [
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::Bayer,
        DitherAlgorithm::Atkinson,
        DitherAlgorithm::Sierra,
    ];

    /// Resolve an algorithm name, falling back to Floyd-Steinberg.
    ///
    /// ```
    /// use glyph_dither::DitherAlgorithm;
    ///
    /// assert_eq!(DitherAlgorithm::from_name("atkinson"), DitherAlgorithm::Atkinson);
    /// assert_eq!(DitherAlgorithm::from_name("blue-noise"), DitherAlgorithm::FloydSteinberg);
    /// ```
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    /// Stable name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::Sierra => "sierra",
            DitherAlgorithm::Bayer => "bayer",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "Floyd-Steinberg",
            DitherAlgorithm::Atkinson => "Atkinson",
            DitherAlgorithm::Sierra => "Sierra",
            DitherAlgorithm::Bayer => "Bayer",
        }
    }

    /// Whether the algorithm propagates quantization error.
    pub fn is_error_diffusion(&self) -> bool {
        !matches!(self, DitherAlgorithm::Bayer)
    }

    /// Run the algorithm on `grid`.
    pub fn apply(&self, grid: SampleGrid, palette: &Palette) -> IndexGrid {
        match self {
            DitherAlgorithm::FloydSteinberg => FloydSteinberg.dither(grid, palette),
            DitherAlgorithm::Atkinson => Atkinson.dither(grid, palette),
            DitherAlgorithm::Sierra => Sierra.dither(grid, palette),
            DitherAlgorithm::Bayer => Bayer.dither(grid, palette),
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for dithering algorithms.
///
/// Implementors consume a grid of samples and produce one palette index per
/// cell, row-major. Every returned index is `< palette.len()`.
pub trait Dither {
    /// Dither `grid` against `palette`.
    fn dither(&self, grid: SampleGrid, palette: &Palette) -> IndexGrid;
}

/// Row-major grid of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    indices: Vec<u8>,
    width: usize,
    height: usize,
}

impl IndexGrid {
    /// Wrap row-major indices.
    ///
    /// # Errors
    ///
    /// [`DitherError::BufferSizeMismatch`] if `indices.len()` is not
    /// `width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize) -> Result<Self, DitherError> {
        if indices.len() != width * height {
            return Err(DitherError::BufferSizeMismatch {
                expected: width * height,
                actual: indices.len(),
            });
        }
        Ok(Self::from_dithered(indices, width, height))
    }

    /// Wrap indices produced by a dither over a `width` x `height` grid.
    pub(crate) fn from_dithered(indices: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        Self {
            indices,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Index at `(x, y)`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width + x]
    }

    pub fn into_indices(self) -> Vec<u8> {
        self.indices
    }
}

/// Core error diffusion loop shared by all kernel-based algorithms.
///
/// For every cell in scan order: match the (already perturbed) sample,
/// record the index, and add `error * weight / divisor` to each in-bounds
/// neighbor named by the kernel. Neighbors outside the grid are skipped;
/// there is no wraparound. Channels are never clamped.
pub(crate) fn dither_with_kernel(
    mut grid: SampleGrid,
    palette: &Palette,
    kernel: &Kernel,
) -> IndexGrid {
    let (width, height) = (grid.width(), grid.height());
    let mut output = vec![0u8; grid.cells()];
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let sample = grid.get(idx);

            let nearest = palette.closest_index(sample);
            output[idx] = nearest;

            let Rgb { r, g, b } = palette.color(nearest as usize);
            let error = [sample.r - r, sample.g - g, sample.b - b];

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                let ny = y + dy as usize;
                if nx >= 0 && (nx as usize) < width && ny < height {
                    grid.add_scaled(ny * width + nx as usize, error, weight as f32 / divisor);
                }
            }
        }
    }

    IndexGrid::from_dithered(output, width, height)
}
