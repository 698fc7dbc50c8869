use crate::assets::AssetLoader;
use crate::error::ConfigError;
use glyph_dither::{
    parse_hex_list, CharacterSet, DitherAlgorithm, DitherSettings, PaletteMode, PresetName, Rgb,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Default dithering settings
    #[serde(default)]
    pub defaults: SettingsConfig,

    /// Canvas rendering options
    #[serde(default)]
    pub render: RenderConfig,

    /// Watch mode options
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Dithering settings as written in config.yaml
///
/// Names are kept as strings so that an unknown algorithm or character set
/// degrades to its default instead of rejecting the whole file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SettingsConfig {
    pub algorithm: String,
    pub character_set: String,
    pub palette_mode: String,
    pub preset: Option<String>,
    pub density: usize,
    pub aspect_ratio: f32,
    pub font_size: f32,
    pub font_family: String,
    pub invert: bool,
    /// Hex colors, e.g. `#33ff66`
    pub custom_palette: Vec<String>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        let d = DitherSettings::default();
        Self {
            algorithm: d.algorithm.name().to_string(),
            character_set: d.character_set.name().to_string(),
            palette_mode: d.palette_mode.name().to_string(),
            preset: None,
            density: d.density,
            aspect_ratio: d.aspect_ratio,
            font_size: d.font_size,
            font_family: d.font_family,
            invert: d.invert,
            custom_palette: Vec::new(),
        }
    }
}

impl SettingsConfig {
    /// Build clamped [`DitherSettings`].
    ///
    /// A preset, when named, is applied last so it wins over the individual
    /// algorithm, character set and palette fields.
    pub fn to_settings(&self) -> Result<DitherSettings, ConfigError> {
        let palette_mode = PaletteMode::from_name(&self.palette_mode).unwrap_or_else(|| {
            tracing::warn!(mode = %self.palette_mode, "Unknown palette mode, using 1-bit");
            PaletteMode::OneBit
        });

        let preset = match self.preset.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                let preset = PresetName::from_name(name);
                if preset.is_none() {
                    tracing::warn!(preset = %name, "Unknown preset, ignoring");
                }
                preset
            }
            _ => None,
        };

        let custom_palette = parse_hex_list(&self.custom_palette)?;

        Ok(DitherSettings::default()
            .with_algorithm(DitherAlgorithm::from_name(&self.algorithm))
            .with_character_set(CharacterSet::from_name(&self.character_set))
            .with_palette_mode(palette_mode)
            .with_custom_palette(custom_palette)
            .with_preset(preset)
            .with_density(self.density)
            .with_aspect_ratio(self.aspect_ratio)
            .with_font_size(self.font_size)
            .with_font_family(self.font_family.clone())
            .with_invert(self.invert))
    }
}

/// Canvas rendering options
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Background color override (hex)
    pub background: Option<String>,
    /// Foreground color override (hex)
    pub foreground: Option<String>,
    /// Re-compress PNG output with oxipng
    pub optimize_png: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: None,
            foreground: None,
            optimize_png: true,
        }
    }
}

impl RenderConfig {
    pub fn background(&self) -> Result<Option<Rgb>, ConfigError> {
        parse_optional_color(self.background.as_deref(), "render.background")
    }

    pub fn foreground(&self) -> Result<Option<Rgb>, ConfigError> {
        parse_optional_color(self.foreground.as_deref(), "render.foreground")
    }
}

fn parse_optional_color(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<Rgb>, ConfigError> {
    value
        .map(|s| {
            s.parse::<Rgb>()
                .map_err(|source| ConfigError::InvalidColor { field, source })
        })
        .transpose()
}

/// Watch mode options
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period before a change triggers a re-render
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 150 }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => Self::from_yaml(&content).unwrap_or_else(|e| {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let config: Self = serde_yaml::from_str(content)?;
        tracing::info!(
            algorithm = %config.defaults.algorithm,
            density = config.defaults.density,
            preset = ?config.defaults.preset,
            "Loaded configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        let settings = config.defaults.to_settings().unwrap();

        assert_eq!(settings, DitherSettings::default());
        assert!(config.render.optimize_png);
        assert_eq!(config.render.background().unwrap(), None);
        assert_eq!(config.watch.debounce(), Duration::from_millis(150));
    }

    #[test]
    fn test_embedded_config_matches_defaults() {
        let loader = AssetLoader::new(None, None);
        let config = AppConfig::load_from_assets(&loader);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r##"
defaults:
  algorithm: bayer
  density: 120
  custom_palette: ["#000", "#33ff66"]
  palette_mode: custom
render:
  background: "#101010"
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();
        let settings = config.defaults.to_settings().unwrap();

        assert_eq!(settings.algorithm, DitherAlgorithm::Bayer);
        assert_eq!(settings.density, 120);
        assert_eq!(settings.palette_mode, PaletteMode::Custom);
        assert_eq!(settings.custom_palette.len(), 2);
        assert_eq!(settings.aspect_ratio, 0.5);
        assert_eq!(
            config.render.background().unwrap(),
            Some(Rgb::from_u8(16, 16, 16))
        );
        assert_eq!(config.watch.debounce_ms, 150);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let yaml = r#"
defaults:
  algorithm: riemersma
  character_set: hieroglyphs
  palette_mode: 24-bit
  preset: commodore
"#;
        let settings = AppConfig::from_yaml(yaml)
            .unwrap()
            .defaults
            .to_settings()
            .unwrap();
        assert_eq!(settings.algorithm, DitherAlgorithm::FloydSteinberg);
        assert_eq!(settings.character_set, CharacterSet::DenseToSparse);
        assert_eq!(settings.palette_mode, PaletteMode::OneBit);
        assert_eq!(settings.preset, None);
    }

    #[test]
    fn test_preset_wins_over_fields() {
        let yaml = r#"
defaults:
  algorithm: sierra
  preset: zx-spectrum
"#;
        let settings = AppConfig::from_yaml(yaml)
            .unwrap()
            .defaults
            .to_settings()
            .unwrap();
        assert_eq!(settings.preset, Some(PresetName::ZxSpectrum));
        assert_eq!(settings.algorithm, DitherAlgorithm::FloydSteinberg);
        assert_eq!(settings.character_set, CharacterSet::BoxDrawing);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let yaml = "defaults:\n  density: 1000\n  aspect_ratio: 0.1\n  font_size: 40\n";
        let settings = AppConfig::from_yaml(yaml)
            .unwrap()
            .defaults
            .to_settings()
            .unwrap();
        assert_eq!(settings.density, 200);
        assert_eq!(settings.aspect_ratio, 0.3);
        assert_eq!(settings.font_size, 16.0);
    }

    #[test]
    fn test_bad_palette_color_is_an_error() {
        let yaml = "defaults:\n  custom_palette: [\"#000\", \"#zzzzzz\"]\n";
        let err = AppConfig::from_yaml(yaml)
            .unwrap()
            .defaults
            .to_settings()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Palette(_)));
    }

    #[test]
    fn test_bad_display_color_is_an_error() {
        let render = RenderConfig {
            foreground: Some("green".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            render.foreground(),
            Err(ConfigError::InvalidColor {
                field: "render.foreground",
                ..
            })
        ));
    }
}
