//! Fixed bit-depth palettes.

use std::fmt;

use super::error::PaletteError;
use super::palette::Palette;
use crate::color::Rgb;

const ONE_BIT: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];

const TWO_BIT: [[u8; 3]; 4] = [[0, 0, 0], [85, 85, 85], [170, 170, 170], [255, 255, 255]];

/// The 16-color CGA table.
const FOUR_BIT: [[u8; 3]; 16] = [
    [0, 0, 0],
    [0, 0, 170],
    [0, 170, 0],
    [0, 170, 170],
    [170, 0, 0],
    [170, 0, 170],
    [170, 85, 0],
    [170, 170, 170],
    [85, 85, 85],
    [85, 85, 255],
    [85, 255, 85],
    [85, 255, 255],
    [255, 85, 85],
    [255, 85, 255],
    [255, 255, 85],
    [255, 255, 255],
];

/// How the palette for a run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteMode {
    /// Black and white.
    #[default]
    OneBit,
    /// Four evenly spaced grays.
    TwoBit,
    /// The 16-color CGA palette.
    FourBit,
    /// A caller-supplied palette.
    Custom,
}

impl PaletteMode {
    /// Every mode, in display order.
    pub const ALL: [PaletteMode; 4] = [
        PaletteMode::OneBit,
        PaletteMode::TwoBit,
        PaletteMode::FourBit,
        PaletteMode::Custom,
    ];

    /// Look up a mode by its name (`1-bit`, `2-bit`, `4-bit`, `custom`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Stable name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            PaletteMode::OneBit => "1-bit",
            PaletteMode::TwoBit => "2-bit",
            PaletteMode::FourBit => "4-bit",
            PaletteMode::Custom => "custom",
        }
    }

    /// Build the palette for this mode.
    ///
    /// `custom` is only consulted for [`PaletteMode::Custom`]. An empty custom
    /// palette falls back to black and white.
    ///
    /// # Errors
    ///
    /// [`PaletteError::TooManyColors`] if a custom palette exceeds 256 entries.
    pub fn resolve(&self, custom: &[Rgb]) -> Result<Palette, PaletteError> {
        match self {
            PaletteMode::OneBit => Ok(Palette::from_table(&ONE_BIT)),
            PaletteMode::TwoBit => Ok(Palette::from_table(&TWO_BIT)),
            PaletteMode::FourBit => Ok(Palette::from_table(&FOUR_BIT)),
            PaletteMode::Custom => match Palette::new(custom) {
                Err(PaletteError::EmptyPalette) => Ok(Palette::black_and_white()),
                other => other,
            },
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_bit() {
        let palette = PaletteMode::OneBit.resolve(&[]).unwrap();
        assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);
    }

    #[test]
    fn test_two_bit_grays() {
        let palette = PaletteMode::TwoBit.resolve(&[]).unwrap();
        let levels: Vec<[u8; 3]> = palette.colors().iter().map(|c| c.to_bytes()).collect();
        assert_eq!(
            levels,
            vec![[0, 0, 0], [85, 85, 85], [170, 170, 170], [255, 255, 255]]
        );
    }

    #[test]
    fn test_four_bit_cga_table() {
        let palette = PaletteMode::FourBit.resolve(&[]).unwrap();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette.color(6), Rgb::from_u8(170, 85, 0));
        assert_eq!(palette.color(9), Rgb::from_u8(85, 85, 255));
        assert_eq!(palette.color(15), Rgb::WHITE);
    }

    #[test]
    fn test_custom_is_verbatim() {
        let custom = [Rgb::from_u8(0, 255, 0), Rgb::from_u8(0, 0, 0)];
        let palette = PaletteMode::Custom.resolve(&custom).unwrap();
        assert_eq!(palette.colors(), &custom);
    }

    #[test]
    fn test_custom_empty_falls_back() {
        let palette = PaletteMode::Custom.resolve(&[]).unwrap();
        assert_eq!(palette, Palette::black_and_white());
    }

    #[test]
    fn test_custom_ignored_for_fixed_modes() {
        let custom = [Rgb::from_u8(1, 2, 3)];
        assert_eq!(PaletteMode::TwoBit.resolve(&custom).unwrap().len(), 4);
    }

    #[test]
    fn test_names_round_trip() {
        for mode in PaletteMode::ALL {
            assert_eq!(PaletteMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(PaletteMode::from_name("8-bit"), None);
    }
}
