//! Bundled presets.
//!
//! A preset pins the algorithm, the character set and the palette together
//! with the background and foreground colors a renderer should use.

use std::fmt;

use crate::charset::CharacterSet;
use crate::color::Rgb;
use crate::dither::DitherAlgorithm;
use crate::palette::{Palette, PaletteMode};

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const GREEN: [u8; 3] = [0, 255, 0];
const AMBER: [u8; 3] = [255, 176, 0];

const TELETEXT_COLORS: [[u8; 3]; 8] = [
    [0, 0, 0],
    [255, 0, 0],
    [0, 255, 0],
    [255, 255, 0],
    [0, 0, 255],
    [255, 0, 255],
    [0, 255, 255],
    [255, 255, 255],
];

const ZX_SPECTRUM_COLORS: [[u8; 3]; 15] = [
    [0, 0, 0],
    [0, 0, 215],
    [215, 0, 0],
    [215, 0, 215],
    [0, 215, 0],
    [0, 215, 215],
    [215, 215, 0],
    [215, 215, 215],
    [0, 0, 255],
    [255, 0, 0],
    [255, 0, 255],
    [0, 255, 0],
    [0, 255, 255],
    [255, 255, 0],
    [255, 255, 255],
];

/// Names of the bundled presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetName {
    TerminalGreen,
    AmberCrt,
    Teletext,
    OneBitMac,
    ZxSpectrum,
}

impl PresetName {
    /// Every preset, in display order.
    pub const ALL: [PresetName; 5] = [
        PresetName::TerminalGreen,
        PresetName::AmberCrt,
        PresetName::Teletext,
        PresetName::OneBitMac,
        PresetName::ZxSpectrum,
    ];

    /// Look up a preset by name. Unlike algorithms there is no fallback:
    /// an unknown preset means "no preset".
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        self.preset().name
    }

    /// The catalog entry for this name.
    pub fn preset(&self) -> &'static Preset {
        match self {
            PresetName::TerminalGreen => &PRESETS[0],
            PresetName::AmberCrt => &PRESETS[1],
            PresetName::Teletext => &PRESETS[2],
            PresetName::OneBitMac => &PRESETS[3],
            PresetName::ZxSpectrum => &PRESETS[4],
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the preset catalog.
#[derive(Debug)]
pub struct Preset {
    /// Stable name, e.g. `1-bit-mac`.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub algorithm: DitherAlgorithm,
    pub character_set: CharacterSet,
    /// Mode reported when the preset is selected. The preset palette is used
    /// regardless of this value.
    pub palette_mode: PaletteMode,
    colors: &'static [[u8; 3]],
    background: [u8; 3],
    foreground: [u8; 3],
}

impl Preset {
    /// The preset's palette.
    pub fn palette(&self) -> Palette {
        Palette::from_table(self.colors)
    }

    /// Palette colors, for use as a custom palette.
    pub fn colors(&self) -> Vec<Rgb> {
        self.colors.iter().map(|&c| Rgb::from_bytes(c)).collect()
    }

    /// Display background color.
    pub fn background(&self) -> Rgb {
        Rgb::from_bytes(self.background)
    }

    /// Display foreground color.
    pub fn foreground(&self) -> Rgb {
        Rgb::from_bytes(self.foreground)
    }
}

/// The preset catalog, in the same order as [`PresetName::ALL`].
pub static PRESETS: [Preset; 5] = [
    Preset {
        name: "terminal-green",
        label: "Terminal Green",
        algorithm: DitherAlgorithm::FloydSteinberg,
        character_set: CharacterSet::DenseToSparse,
        palette_mode: PaletteMode::Custom,
        colors: &[BLACK, GREEN],
        background: BLACK,
        foreground: GREEN,
    },
    Preset {
        name: "amber-crt",
        label: "Amber CRT",
        algorithm: DitherAlgorithm::FloydSteinberg,
        character_set: CharacterSet::DenseToSparse,
        palette_mode: PaletteMode::Custom,
        colors: &[BLACK, AMBER],
        background: BLACK,
        foreground: AMBER,
    },
    Preset {
        name: "teletext",
        label: "Teletext",
        algorithm: DitherAlgorithm::Bayer,
        character_set: CharacterSet::BoxDrawing,
        palette_mode: PaletteMode::Custom,
        colors: &TELETEXT_COLORS,
        background: BLACK,
        foreground: WHITE,
    },
    Preset {
        name: "1-bit-mac",
        label: "1-bit Mac",
        algorithm: DitherAlgorithm::Atkinson,
        character_set: CharacterSet::DenseToSparse,
        palette_mode: PaletteMode::OneBit,
        colors: &[BLACK, WHITE],
        background: WHITE,
        foreground: BLACK,
    },
    Preset {
        name: "zx-spectrum",
        label: "ZX Spectrum",
        algorithm: DitherAlgorithm::FloydSteinberg,
        character_set: CharacterSet::BoxDrawing,
        palette_mode: PaletteMode::Custom,
        colors: &ZX_SPECTRUM_COLORS,
        background: BLACK,
        foreground: WHITE,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_names() {
        for (name, preset) in PresetName::ALL.iter().zip(PRESETS.iter()) {
            assert_eq!(name.name(), preset.name);
            assert_eq!(PresetName::from_name(preset.name), Some(*name));
        }
    }

    #[test]
    fn test_unknown_preset_is_none() {
        assert_eq!(PresetName::from_name("c64"), None);
    }

    #[test]
    fn test_palette_sizes() {
        assert_eq!(PresetName::Teletext.preset().palette().len(), 8);
        assert_eq!(PresetName::ZxSpectrum.preset().palette().len(), 15);
        assert_eq!(PresetName::AmberCrt.preset().palette().len(), 2);
    }

    #[test]
    fn test_amber_foreground() {
        let amber = PresetName::AmberCrt.preset();
        assert_eq!(amber.foreground().to_hex(), "#ffb000");
        assert_eq!(amber.background(), Rgb::BLACK);
    }

    #[test]
    fn test_one_bit_mac_is_inverted_display() {
        let mac = PresetName::OneBitMac.preset();
        assert_eq!(mac.background(), Rgb::WHITE);
        assert_eq!(mac.foreground(), Rgb::BLACK);
        assert_eq!(mac.palette_mode, PaletteMode::OneBit);
        assert_eq!(mac.algorithm, DitherAlgorithm::Atkinson);
    }
}
