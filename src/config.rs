//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/etchsketch/config.json`, or from the path given with
//! `--config <path>`.  Every section and field is optional.
//!
//! # Example
//!
//! ```json
//! {
//!   "canvas": {
//!     "initial_size": 24,
//!     "cell_border": true
//!   },
//!   "window": {
//!     "canvas_px": 640,
//!     "resize_debounce_ms": 250
//!   }
//! }
//! ```

use crate::state::{GridSize, DEFAULT_SIZE};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// A minimal `{}` file is valid and all sections fall back to their
/// compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Drawing grid settings.
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Window layout and timing settings.
    #[serde(default)]
    pub window: WindowConfig,
}

/// Drawing grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Cells per side at startup.  Must lie in `1..=100`.
    pub initial_size: i64,
    /// Draw a thin line between cells.
    pub cell_border: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_SIZE as i64,
            cell_border: true,
        }
    }
}

impl CanvasConfig {
    /// The validated starting size, falling back to the default (with a
    /// warning) when the configured value is out of range.
    pub fn initial_grid_size(&self) -> GridSize {
        match GridSize::new(self.initial_size) {
            Ok(size) => size,
            Err(e) => {
                warn!("config: {}; using {}", e, DEFAULT_SIZE);
                GridSize::default()
            }
        }
    }
}

/// Window layout and timing settings.
///
/// Durations are in **milliseconds**.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Edge length of the square drawing area in pixels.
    pub canvas_px: i32,
    /// How long the size slider must rest before the grid is rebuilt.
    /// Set to `0` to rebuild on every slider change.
    pub resize_debounce_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            canvas_px: 640,
            resize_debounce_ms: 250,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "canvas": { "initial_size": 24, "cell_border": false },
            "window": { "canvas_px": 480, "resize_debounce_ms": 0 }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.canvas.initial_size, 24);
        assert!(!cfg.canvas.cell_border);
        assert_eq!(cfg.window.canvas_px, 480);
        assert_eq!(cfg.window.resize_debounce_ms, 0);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.canvas.initial_size, 16);
        assert!(cfg.canvas.cell_border);
        let wd = WindowConfig::default();
        assert_eq!(cfg.window.canvas_px, wd.canvas_px);
        assert_eq!(cfg.window.resize_debounce_ms, wd.resize_debounce_ms);
    }

    #[test]
    fn deserialize_partial_sections() {
        let json = r#"{ "window": { "canvas_px": 300 } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.window.canvas_px, 300);
        assert_eq!(cfg.window.resize_debounce_ms, 250);
        assert_eq!(cfg.canvas.initial_size, 16);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "canvas": {}, "future_section": { "key": 42 } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn out_of_range_initial_size_falls_back() {
        let canvas = CanvasConfig {
            initial_size: 500,
            ..CanvasConfig::default()
        };
        assert_eq!(canvas.initial_grid_size().get(), 16);

        let canvas = CanvasConfig {
            initial_size: 64,
            ..CanvasConfig::default()
        };
        assert_eq!(canvas.initial_grid_size().get(), 64);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("etchsketch-does-not-exist.json");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("config error: failed to read"));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("etchsketch-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "canvas": { "initial_size": 8 } }"#).unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.canvas.initial_grid_size().get(), 8);
        let _ = std::fs::remove_file(&path);
    }
}
