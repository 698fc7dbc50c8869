//! Per-run dithering settings.

use crate::charset::CharacterSet;
use crate::color::Rgb;
use crate::dither::DitherAlgorithm;
use crate::palette::{Palette, PaletteError, PaletteMode};
use crate::preset::{Preset, PresetName};

/// Column count range.
pub const DENSITY_RANGE: (usize, usize) = (1, 200);
/// Cell aspect ratio range (glyph width / height).
pub const ASPECT_RATIO_RANGE: (f32, f32) = (0.3, 1.0);
/// Glyph size range in pixels.
pub const FONT_SIZE_RANGE: (f32, f32) = (4.0, 16.0);

/// Everything one pipeline run needs to know.
///
/// The setters clamp values into their documented range. Selecting a
/// preset copies its algorithm, character set, palette mode and palette
/// into the settings; changing any of those afterwards clears the preset.
///
/// ```
/// use glyph_dither::{DitherAlgorithm, DitherSettings, PresetName};
///
/// let settings = DitherSettings::default()
///     .with_preset(Some(PresetName::OneBitMac))
///     .with_density(500);
/// assert_eq!(settings.algorithm, DitherAlgorithm::Atkinson);
/// assert_eq!(settings.density, 200);
///
/// let settings = settings.with_algorithm(DitherAlgorithm::Bayer);
/// assert_eq!(settings.preset, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherSettings {
    pub algorithm: DitherAlgorithm,
    pub character_set: CharacterSet,
    pub palette_mode: PaletteMode,
    pub preset: Option<PresetName>,
    /// Glyph columns.
    pub density: usize,
    pub aspect_ratio: f32,
    /// Rendering only.
    pub font_size: f32,
    /// Rendering only.
    pub font_family: String,
    pub invert: bool,
    /// Only consulted when `palette_mode` is [`PaletteMode::Custom`].
    pub custom_palette: Vec<Rgb>,
}

impl Default for DitherSettings {
    fn default() -> Self {
        Self {
            algorithm: DitherAlgorithm::FloydSteinberg,
            character_set: CharacterSet::DenseToSparse,
            palette_mode: PaletteMode::OneBit,
            preset: None,
            density: 80,
            aspect_ratio: 0.5,
            font_size: 8.0,
            font_family: "monospace".to_string(),
            invert: false,
            custom_palette: Vec::new(),
        }
    }
}

impl DitherSettings {
    /// Select a preset, or clear it with `None`.
    pub fn with_preset(mut self, preset: Option<PresetName>) -> Self {
        if let Some(name) = preset {
            let p = name.preset();
            self.algorithm = p.algorithm;
            self.character_set = p.character_set;
            self.palette_mode = p.palette_mode;
            self.custom_palette = p.colors();
        }
        self.preset = preset;
        self
    }

    pub fn with_algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self.preset = None;
        self
    }

    pub fn with_character_set(mut self, character_set: CharacterSet) -> Self {
        self.character_set = character_set;
        self.preset = None;
        self
    }

    pub fn with_palette_mode(mut self, palette_mode: PaletteMode) -> Self {
        self.palette_mode = palette_mode;
        self.preset = None;
        self
    }

    pub fn with_custom_palette(mut self, colors: Vec<Rgb>) -> Self {
        self.custom_palette = colors;
        self.preset = None;
        self
    }

    pub fn with_density(mut self, density: usize) -> Self {
        self.density = density.clamp(DENSITY_RANGE.0, DENSITY_RANGE.1);
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = clamp_f32(aspect_ratio, ASPECT_RATIO_RANGE, 0.5);
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = clamp_f32(font_size, FONT_SIZE_RANGE, 8.0);
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Active preset entry, if any.
    pub fn active_preset(&self) -> Option<&'static Preset> {
        self.preset.map(|name| name.preset())
    }

    /// Settings as the pipeline sees them.
    ///
    /// With a preset active, its algorithm, character set and palette win
    /// over the individual fields and the palette mode reads `custom`.
    /// Aspect ratio and font size are brought into range so the geometry
    /// stays finite. Density is capped at the top of its range; zero is kept
    /// so the downsampler reports it.
    pub fn effective(&self) -> DitherSettings {
        let mut settings = self.clone();
        if let Some(p) = self.active_preset() {
            settings.algorithm = p.algorithm;
            settings.character_set = p.character_set;
            settings.palette_mode = PaletteMode::Custom;
            settings.custom_palette = p.colors();
        }
        settings.density = settings.density.min(DENSITY_RANGE.1);
        settings.aspect_ratio = clamp_f32(settings.aspect_ratio, ASPECT_RATIO_RANGE, 0.5);
        settings.font_size = clamp_f32(settings.font_size, FONT_SIZE_RANGE, 8.0);
        settings
    }

    /// Palette for a run with these settings.
    ///
    /// A preset palette bypasses mode resolution. An empty custom palette
    /// resolves to black and white.
    ///
    /// # Errors
    ///
    /// [`PaletteError::TooManyColors`] for a custom palette above 256 entries.
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        match self.active_preset() {
            Some(p) => Ok(p.palette()),
            None => self.palette_mode.resolve(&self.custom_palette),
        }
    }
}

fn clamp_f32(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
