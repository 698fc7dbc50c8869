pub mod config;

pub use config::{AppConfig, RenderConfig, SettingsConfig, WatchConfig};
