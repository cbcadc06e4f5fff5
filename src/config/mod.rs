//! Configuration file support for doodlepad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/doodlepad/config.toml`. Settings include the initial brush,
//! size presets, display density, canvas compositing and export options.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{BrushConfig, CanvasConfig, DisplayConfig, DrawingConfig, ExportConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_brush_size = "medium"
///
/// [brush]
/// small = 10.0
/// medium = 20.0
/// large = 30.0
///
/// [display]
/// density = 2.0
///
/// [export]
/// filename_prefix = "DrawingApp_"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial brush color and size
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Brush size presets
    #[serde(default)]
    pub brush: BrushConfig,

    /// Display density used to convert device-independent units to pixels
    #[serde(default)]
    pub display: DisplayConfig,

    /// Canvas background and flattening
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Export destination and file naming
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `display.density`: 0.5 - 4.0
    /// - `brush.small`, `brush.medium`, `brush.large`: 1.0 - 100.0
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    pub fn validate_and_clamp(&mut self) {
        if !(0.5..=4.0).contains(&self.display.density) {
            log::warn!(
                "Invalid display density {:.2}, clamping to 0.5-4.0 range",
                self.display.density
            );
            self.display.density = if self.display.density.is_nan() {
                1.0
            } else {
                self.display.density.clamp(0.5, 4.0)
            };
        }

        for (name, size) in [
            ("small", &mut self.brush.small),
            ("medium", &mut self.brush.medium),
            ("large", &mut self.brush.large),
        ] {
            if !(1.0..=100.0).contains(&*size) {
                log::warn!(
                    "Invalid brush {} size {:.1}, clamping to 1.0-100.0 range",
                    name,
                    size
                );
                *size = if size.is_nan() {
                    1.0
                } else {
                    size.clamp(1.0, 100.0)
                };
            }
        }

        for (name, dim) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !(1..=8192).contains(&*dim) {
                log::warn!(
                    "Invalid canvas {} {}, clamping to 1-8192 range",
                    name,
                    dim
                );
                *dim = (*dim).clamp(1, 8192);
            }
        }

        if self.export.filename_prefix.contains(['/', '\\']) {
            log::warn!(
                "Invalid export filename_prefix '{}', falling back to 'DrawingApp_'",
                self.export.filename_prefix
            );
            self.export.filename_prefix = "DrawingApp_".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/doodlepad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("doodlepad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&config_path, Self::example_toml())?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// The documented example configuration shipped with the crate.
    pub fn example_toml() -> &'static str {
        include_str!("../../config.example.toml")
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BrushSize;
    use crate::draw::color::{BLACK, WHITE};

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.brush, BrushConfig::default());
        assert_eq!(config.drawing.default_brush_size, BrushSize::Medium);
        assert_eq!(config.drawing.default_color.to_color_or(WHITE), BLACK);
        assert_eq!(config.display.density, 1.0);
        assert!(!config.canvas.flatten_strokes);
        assert_eq!(config.export.filename_prefix, "DrawingApp_");
        assert!(config.export.directory.is_none());
    }

    #[test]
    fn example_file_parses() {
        let config: Config = toml::from_str(Config::example_toml()).unwrap();
        assert_eq!(config.brush.large, 30.0);
        assert_eq!(config.export.filename_prefix, "DrawingApp_");
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config: Config = toml::from_str(
            r#"
            [display]
            density = 9.0

            [brush]
            small = -4.0
            large = 500.0

            [canvas]
            width = 0

            [export]
            filename_prefix = "../evil"
            "#,
        )
        .unwrap();

        config.validate_and_clamp();

        assert_eq!(config.display.density, 4.0);
        assert_eq!(config.brush.small, 1.0);
        assert_eq!(config.brush.medium, 20.0);
        assert_eq!(config.brush.large, 100.0);
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.export.filename_prefix, "DrawingApp_");
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.display.density, 1.0);
    }

    #[test]
    fn serialized_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.display.density = 2.0;
        config.canvas.flatten_strokes = true;
        config.drawing.default_color = ColorSpec::Rgb([10, 20, 30]);

        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.display.density, 2.0);
        assert!(loaded.canvas.flatten_strokes);
        assert_eq!(loaded.drawing.default_color, ColorSpec::Rgb([10, 20, 30]));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display\ndensity = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        for section in ["drawing", "brush", "display", "canvas", "export"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
