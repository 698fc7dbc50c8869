//! Asset loading with embedded fallbacks
//!
//! The default `config.yaml` is compiled into the binary. A config file or a
//! fonts directory given on the command line (or through `CONFIG_FILE` /
//! `FONTS_DIR`) takes priority:
//!
//! - config: external file if it exists, embedded copy otherwise
//! - fonts: external directory only; system fonts are always loaded by the
//!   renderer

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External fonts directory
    fonts_dir: Option<PathBuf>,
    /// External config file path
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// With both paths `None`, only the embedded config and system fonts
    /// are used.
    pub fn new(fonts_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            fonts_dir,
            config_file,
        }
    }

    /// Path of the external config file, if one was configured.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::debug!(path = %path.display(), "Config file not found, using embedded");
        }

        EmbeddedConfig::get(CONFIG_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Font files from the external fonts directory (for loading into fontdb)
    pub fn get_fonts(&self) -> Vec<(String, Cow<'static, [u8]>)> {
        let mut fonts = Vec::new();

        let Some(ref dir) = self.fonts_dir else {
            return fonts;
        };
        let Ok(entries) = fs::read_dir(dir) else {
            tracing::warn!(dir = %dir.display(), "Fonts directory not readable");
            return fonts;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
                .unwrap_or(false);
            if !is_font {
                continue;
            }
            match fs::read(&path) {
                Ok(data) => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    tracing::trace!(font = %name, "Loading font from filesystem");
                    fonts.push((name, Cow::Owned(data)));
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to read font"),
            }
        }

        fonts.sort_by(|a, b| a.0.cmp(&b.0));
        fonts
    }

    /// Extract the embedded config to the filesystem (init command)
    ///
    /// Writes to the configured config path, or `./config.yaml`.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_NAME));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }

        if let Some(data) = EmbeddedConfig::get(CONFIG_NAME) {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, &*data.data)?;
            report.written.push(path.display().to_string());
        }

        Ok(report)
    }

    /// List embedded asset names
    pub fn list_embedded() -> Vec<String> {
        EmbeddedConfig::iter().map(|s| s.to_string()).collect()
    }
}
