//! Ordered palette with nearest-color matching.

use super::error::PaletteError;
use super::MAX_PALETTE_LEN;
use crate::color::Rgb;

/// An ordered set of representable colors.
///
/// Insertion order defines the index of every entry and is never changed
/// after construction, so an index grid stays meaningful for the lifetime of
/// the palette it was produced against. Duplicate entries are allowed; the
/// matcher resolves them to the lowest index.
///
/// # Example
///
/// ```
/// use glyph_dither::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.closest_index(Rgb::from_u8(200, 200, 200)), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from colors in index order.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] if `colors` has more than 256 entries
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_LEN {
            return Err(PaletteError::TooManyColors { len: colors.len() });
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from `[R, G, B]` byte triples.
    pub fn from_bytes(colors: &[[u8; 3]]) -> Result<Self, PaletteError> {
        let colors: Vec<Rgb> = colors.iter().map(|&c| Rgb::from_bytes(c)).collect();
        Self::new(&colors)
    }

    /// Create a palette from hex color strings.
    ///
    /// ```
    /// use glyph_dither::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000", "#00ff00"]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// ```
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        let parsed = parse_hex_list(colors)?;
        Self::new(&parsed)
    }

    /// Palette from a built-in table known to hold 1..=256 entries.
    pub(crate) fn from_table(colors: &[[u8; 3]]) -> Self {
        debug_assert!(!colors.is_empty() && colors.len() <= MAX_PALETTE_LEN);
        Self {
            colors: colors.iter().map(|&c| Rgb::from_bytes(c)).collect(),
        }
    }

    /// The two-color black and white palette.
    pub fn black_and_white() -> Self {
        Self {
            colors: vec![Rgb::BLACK, Rgb::WHITE],
        }
    }

    /// Number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// All colors in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Index of the entry closest to `sample` by squared Euclidean distance.
    ///
    /// Entries are scanned in index order and only a strictly smaller
    /// distance replaces the current best, so exact ties resolve to the
    /// lowest index. Samples may lie outside 0..=255; the distance is computed
    /// on the raw values.
    #[inline]
    pub fn closest_index(&self, sample: Rgb) -> u8 {
        let mut best_idx = 0usize;
        let mut best_dist = f32::INFINITY;
        for (i, &color) in self.colors.iter().enumerate() {
            let dist = sample.distance_sq(color);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }
        best_idx as u8
    }
}

/// Parse a list of hex strings, reporting the index of the first bad entry.
pub fn parse_hex_list<S: AsRef<str>>(colors: &[S]) -> Result<Vec<Rgb>, PaletteError> {
    colors
        .iter()
        .enumerate()
        .map(|(index, s)| {
            s.as_ref()
                .parse::<Rgb>()
                .map_err(|source| PaletteError::ParseColor { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ParseColorError;

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(&[]), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_too_many_colors_rejected() {
        let colors = vec![Rgb::BLACK; 257];
        assert_eq!(
            Palette::new(&colors),
            Err(PaletteError::TooManyColors { len: 257 })
        );
        assert!(Palette::new(&colors[..256]).is_ok());
    }

    #[test]
    fn test_closest_index_exact_match() {
        let palette = Palette::from_bytes(&[[0, 0, 0], [255, 0, 0], [255, 255, 255]]).unwrap();
        assert_eq!(palette.closest_index(Rgb::from_u8(255, 0, 0)), 1);
        assert_eq!(palette.closest_index(Rgb::from_u8(250, 250, 250)), 2);
    }

    #[test]
    fn test_closest_index_tie_goes_to_lowest_index() {
        // 100 sits exactly between 50 and 150 on every channel
        let palette = Palette::from_bytes(&[[150, 150, 150], [50, 50, 50]]).unwrap();
        assert_eq!(palette.closest_index(Rgb::from_u8(100, 100, 100)), 0);

        let reversed = Palette::from_bytes(&[[50, 50, 50], [150, 150, 150]]).unwrap();
        assert_eq!(reversed.closest_index(Rgb::from_u8(100, 100, 100)), 0);
    }

    #[test]
    fn test_closest_index_duplicates_resolve_low() {
        let palette = Palette::from_bytes(&[[9, 9, 9], [0, 0, 0], [0, 0, 0]]).unwrap();
        assert_eq!(palette.closest_index(Rgb::BLACK), 1);
    }

    #[test]
    fn test_closest_index_out_of_range_sample() {
        let palette = Palette::black_and_white();
        assert_eq!(palette.closest_index(Rgb::new(-80.0, -80.0, -80.0)), 0);
        assert_eq!(palette.closest_index(Rgb::new(400.0, 400.0, 400.0)), 1);
    }

    #[test]
    fn test_closest_index_minimises_distance() {
        let palette = Palette::from_hex(&[
            "#000000", "#0000aa", "#00aa00", "#aa0000", "#555555", "#ffff55", "#ffffff",
        ])
        .unwrap();
        for sample in [
            Rgb::from_u8(12, 40, 200),
            Rgb::from_u8(90, 80, 70),
            Rgb::from_u8(240, 230, 100),
            Rgb::new(-3.0, 180.0, 20.0),
        ] {
            let best = palette.closest_index(sample) as usize;
            let best_dist = sample.distance_sq(palette.color(best));
            for (i, &c) in palette.colors().iter().enumerate() {
                let d = sample.distance_sq(c);
                assert!(d >= best_dist, "entry {i} is closer than chosen {best}");
                if d == best_dist {
                    assert!(i >= best, "tie at {i} should not beat lower index {best}");
                }
            }
        }
    }

    #[test]
    fn test_from_hex_reports_bad_index() {
        let err = Palette::from_hex(&["#000", "#12345", "#fff"]).unwrap_err();
        assert_eq!(
            err,
            PaletteError::ParseColor {
                index: 1,
                source: ParseColorError::InvalidLength
            }
        );
    }
}
