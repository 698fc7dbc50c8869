//! Luminance-ordered glyph ramps.
//!
//! Every ramp runs from the densest glyph to the sparsest and ends with a
//! space, so dark cells read as heavy ink and the brightest cells vanish.

use std::fmt;

use crate::color::{luminance, Rgb};
use crate::palette::Palette;

const DENSE_TO_SPARSE: [char; 41] = [
    '@', '#', 'W', 'M', 'B', '8', '&', '%', '$', 'X', 'D', 'Q', 'O', '0', 'Z', 'U', 'J', 'C', 'L',
    'Y', 'T', '{', '/', '\\', '|', '(', ')', '1', 'j', 'i', 'l', '!', ';', ':', ',', '"', '^', '`',
    '\'', '.', ' ',
];

const BOX_DRAWING: [char; 32] = [
    '█', '▓', '▒', '░', '▐', '▌', '▀', '▄', '■', '□', '▪', '▫', '●', '○', '◆', '◇', '◼', '◻', '▣',
    '▢', '▩', '▨', '▧', '▦', '╳', '╬', '╪', '┼', '─', '│', '·', ' ',
];

const BRAILLE: [char; 37] = [
    '⣿', '⣷', '⣯', '⣟', '⡿', '⢿', '⣻', '⣽', '⣾', '⣶', '⣮', '⣞', '⡾', '⢾', '⣺', '⣼', '⣤', '⣠', '⣄',
    '⡤', '⢤', '⣰', '⣸', '⣴', '⡆', '⢰', '⡄', '⢠', '⡀', '⢀', '⠁', '⠂', '⠄', '⠈', '⠐', '⠠', ' ',
];

/// Glyph ramp used to draw cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterSet {
    /// Printable ASCII, 41 glyphs.
    #[default]
    DenseToSparse,
    /// Block and box-drawing glyphs, 32 glyphs.
    BoxDrawing,
    /// Braille dot patterns, 37 glyphs.
    Braille,
}

impl CharacterSet {
    /// Every character set, in display order.
    pub const ALL: [CharacterSet; 3] = [
        CharacterSet::DenseToSparse,
        CharacterSet::BoxDrawing,
        CharacterSet::Braille,
    ];

    /// Resolve a set name, falling back to dense-to-sparse.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterSet::DenseToSparse => "dense-to-sparse",
            CharacterSet::BoxDrawing => "box-drawing",
            CharacterSet::Braille => "braille",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CharacterSet::DenseToSparse => "Standard",
            CharacterSet::BoxDrawing => "Box Drawing",
            CharacterSet::Braille => "Braille",
        }
    }

    /// The ramp, densest glyph first.
    pub fn glyphs(&self) -> &'static [char] {
        match self {
            CharacterSet::DenseToSparse => &DENSE_TO_SPARSE,
            CharacterSet::BoxDrawing => &BOX_DRAWING,
            CharacterSet::Braille => &BRAILLE,
        }
    }

    /// Glyph for a luminance on the 0..=255 scale.
    ///
    /// Out-of-range luminance is clamped. With `invert`, bright maps to dense.
    ///
    /// ```
    /// use glyph_dither::CharacterSet;
    ///
    /// let set = CharacterSet::DenseToSparse;
    /// assert_eq!(set.luminance_to_glyph(0.0, false), '@');
    /// assert_eq!(set.luminance_to_glyph(255.0, false), ' ');
    /// assert_eq!(set.luminance_to_glyph(255.0, true), '@');
    /// ```
    pub fn luminance_to_glyph(&self, lum: f32, invert: bool) -> char {
        let glyphs = self.glyphs();
        let mut n = lum.clamp(0.0, 255.0) / 255.0;
        if invert {
            n = 1.0 - n;
        }
        let idx = ((n * glyphs.len() as f32).floor() as usize).min(glyphs.len() - 1);
        glyphs[idx]
    }

    /// Glyph for an original sample, by its luminance.
    #[inline]
    pub fn sample_to_glyph(&self, sample: Rgb, invert: bool) -> char {
        self.luminance_to_glyph(luminance(sample.r, sample.g, sample.b), invert)
    }

    /// Glyph for the palette color at `index`.
    pub fn palette_index_to_glyph(&self, index: u8, palette: &Palette, invert: bool) -> char {
        self.sample_to_glyph(palette.color(index as usize), invert)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
