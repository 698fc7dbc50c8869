//! DitherResult and the result builder.

use std::time::Duration;

use crate::charset::CharacterSet;
use crate::dither::IndexGrid;
use crate::downsample::SampleGrid;
use crate::error::DitherError;
use crate::palette::Palette;
use crate::settings::DitherSettings;

/// The product of one pipeline run.
///
/// Holds `rows` text lines of exactly `cols` glyphs each, one palette index
/// per cell in row-major order, and the palette those indices address.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use glyph_dither::{build_result, DitherSettings, IndexGrid, Palette};
///
/// let indices = IndexGrid::new(vec![0, 1, 1, 0], 2, 2).unwrap();
/// let result = build_result(
///     indices,
///     Palette::black_and_white(),
///     &DitherSettings::default(),
///     None,
///     Duration::ZERO,
/// )
/// .unwrap();
///
/// assert_eq!(result.text(), "@ \n @");
/// assert_eq!(result.indices(), &[0, 1, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherResult {
    lines: Vec<String>,
    indices: Vec<u8>,
    cols: usize,
    rows: usize,
    palette: Palette,
    elapsed: Duration,
}

/// One cell of a [`DitherResult`], as visited by [`DitherResult::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub glyph: char,
    /// Palette index of the matched color.
    pub index: u8,
}

impl DitherResult {
    /// Text rows, top to bottom.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rows joined with `\n`, no trailing newline.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Palette indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Time spent producing the result.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Every cell with its glyph and palette index, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.lines.iter().enumerate().flat_map(move |(y, line)| {
            line.chars().enumerate().map(move |(x, glyph)| Cell {
                x,
                y,
                glyph,
                index: self.indices[y * self.cols + x],
            })
        })
    }
}

/// Assemble a [`DitherResult`].
///
/// With `originals`, each glyph is chosen from the luminance of the
/// undithered sample, which keeps tonal detail that a small palette would
/// flatten. Without it the glyph follows the luminance of the matched
/// palette color. `settings` supplies the character set and the invert
/// flag; pass effective settings so an active preset's character set wins.
///
/// # Errors
///
/// - [`DitherError::IndexOutOfRange`] if an index addresses no palette color
/// - [`DitherError::GridSizeMismatch`] if `originals` does not cover the
///   same cells as `indices`
pub fn build_result(
    indices: IndexGrid,
    palette: Palette,
    settings: &DitherSettings,
    originals: Option<&SampleGrid>,
    elapsed: Duration,
) -> Result<DitherResult, DitherError> {
    let (cols, rows) = (indices.width(), indices.height());

    if let Some(&index) = indices
        .indices()
        .iter()
        .find(|&&i| i as usize >= palette.len())
    {
        return Err(DitherError::IndexOutOfRange {
            index,
            palette_len: palette.len(),
        });
    }
    if let Some(grid) = originals {
        if (grid.width(), grid.height()) != (cols, rows) {
            return Err(DitherError::GridSizeMismatch {
                expected: (cols, rows),
                actual: (grid.width(), grid.height()),
            });
        }
    }

    let set: CharacterSet = settings.character_set;
    let invert = settings.invert;

    let lines = (0..rows)
        .map(|y| {
            (0..cols)
                .map(|x| match originals {
                    Some(grid) => set.sample_to_glyph(grid.at(x, y), invert),
                    None => set.palette_index_to_glyph(indices.at(x, y), &palette, invert),
                })
                .collect::<String>()
        })
        .collect();

    Ok(DitherResult {
        lines,
        indices: indices.into_indices(),
        cols,
        rows,
        palette,
        elapsed,
    })
}
