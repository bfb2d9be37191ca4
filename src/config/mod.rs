//! Configuration file support for inkboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/inkboard/config.toml`. Settings include tool defaults,
//! surface geometry, rendering options and export preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{DrawingConfig, ExportConfig, RenderConfig, SurfaceConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const WIDTH_RANGE: (f64, f64) = (0.5, 100.0);
const DEVICE_PIXEL_RATIO_RANGE: (f64, f64) = (0.5, 4.0);

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#000000"
/// default_width = 5.0
/// brush_sizes = [2, 5, 10, 15, 20]
///
/// [surface]
/// width = 800
/// height = 600
/// device_pixel_ratio = 2.0
///
/// [export]
/// save_directory = "~/Pictures/Inkboard"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Tool defaults (color, width, brush presets, eraser)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Surface layout size, pixel ratio and background
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Rendering options
    #[serde(default)]
    pub render: RenderConfig,

    /// PNG export destination
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width` and each brush size: 0.5 - 100.0
    /// - `device_pixel_ratio`: 0.5 - 4.0
    /// - `surface.width` / `surface.height`: at least 1.0
    pub fn validate_and_clamp(&mut self) {
        let (min_width, max_width) = WIDTH_RANGE;

        if !self.drawing.default_width.is_finite() {
            warn!("Invalid default_width, falling back to 5.0");
            self.drawing.default_width = 5.0;
        } else if !(min_width..=max_width).contains(&self.drawing.default_width) {
            warn!(
                "Invalid default_width {:.1}, clamping to {min_width}-{max_width} range",
                self.drawing.default_width
            );
            self.drawing.default_width = self.drawing.default_width.clamp(min_width, max_width);
        }

        let sizes = self.drawing.brush_sizes.len();
        self.drawing.brush_sizes.retain(|size| size.is_finite());
        for size in &mut self.drawing.brush_sizes {
            if !(min_width..=max_width).contains(size) {
                warn!("Invalid brush size {size:.1}, clamping to {min_width}-{max_width} range");
                *size = size.clamp(min_width, max_width);
            }
        }
        if self.drawing.brush_sizes.len() != sizes {
            warn!("Dropped {} non-numeric brush sizes", sizes - self.drawing.brush_sizes.len());
        }
        if self.drawing.brush_sizes.is_empty() {
            warn!("No brush sizes configured, restoring defaults");
            self.drawing.brush_sizes = DrawingConfig::default().brush_sizes;
        }

        let (min_ratio, max_ratio) = DEVICE_PIXEL_RATIO_RANGE;
        if !self.surface.device_pixel_ratio.is_finite() {
            warn!("Invalid device_pixel_ratio, falling back to 1.0");
            self.surface.device_pixel_ratio = 1.0;
        } else if !(min_ratio..=max_ratio).contains(&self.surface.device_pixel_ratio) {
            warn!(
                "Invalid device_pixel_ratio {:.2}, clamping to {min_ratio}-{max_ratio} range",
                self.surface.device_pixel_ratio
            );
            self.surface.device_pixel_ratio =
                self.surface.device_pixel_ratio.clamp(min_ratio, max_ratio);
        }

        for (name, value) in [
            ("width", &mut self.surface.width),
            ("height", &mut self.surface.height),
        ] {
            if !(value.is_finite() && *value >= 1.0) {
                warn!("Invalid surface {name} {value}, using 1.0");
                *value = 1.0;
            }
        }

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty filename_template, falling back to default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit file. The file must exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to the default path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Serializes the configuration to `config_path`.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config directory.
    ///
    /// # Errors
    /// Same as [`Config::create_default_file_at`], plus a missing config directory.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        Self::create_default_file_at(&config_path)?;
        Ok(config_path)
    }

    /// Writes the example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The parent directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file_at(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }
}

/// Documented example configuration shipped with the crate.
pub const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.drawing.default_color.to_color(), BLACK);
        assert_eq!(config.drawing.default_width, 5.0);
        assert_eq!(config.drawing.brush_sizes, vec![2.0, 5.0, 10.0, 15.0, 20.0]);
        assert_eq!(config.drawing.eraser_color.to_color(), WHITE);
        assert_eq!((config.surface.width, config.surface.height), (800.0, 600.0));
        assert!(config.render.single_point_dots);
        assert_eq!(config.export.filename_template, "artwork_%Y-%m-%d_%H%M%S");
    }

    #[test]
    fn example_config_parses_to_defaults() {
        let config: Config = toml::from_str(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();
        assert_eq!(config.drawing.default_width, defaults.drawing.default_width);
        assert_eq!(config.drawing.brush_sizes, defaults.drawing.brush_sizes);
        assert_eq!(
            config.drawing.default_color.to_color(),
            defaults.drawing.default_color.to_color()
        );
        assert_eq!(
            config.surface.device_pixel_ratio,
            defaults.surface.device_pixel_ratio
        );
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            default_color = [255, 0, 0]

            [surface]
            background = "white"
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.default_width, 5.0);
        assert_eq!(config.surface.background.map(|c| c.to_color()), Some(WHITE));
        assert_eq!(config.export.save_directory, "~/Pictures/Inkboard");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.drawing.default_width = 500.0;
        config.drawing.brush_sizes = vec![0.1, f64::NAN, 7.0];
        config.surface.device_pixel_ratio = 9.0;
        config.surface.width = -3.0;

        config.validate_and_clamp();

        assert_eq!(config.drawing.default_width, 100.0);
        assert_eq!(config.drawing.brush_sizes, vec![0.5, 7.0]);
        assert_eq!(config.surface.device_pixel_ratio, 4.0);
        assert_eq!(config.surface.width, 1.0);
    }

    #[test]
    fn empty_brush_list_restores_defaults() {
        let mut config = Config::default();
        config.drawing.brush_sizes.clear();
        config.validate_and_clamp();
        assert_eq!(config.drawing.brush_sizes.len(), 5);
    }

    #[test]
    fn save_and_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.drawing.default_width = 12.0;
        config.surface.background = Some(ColorSpec::Name("#336699".into()));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.drawing.default_width, 12.0);
        assert_eq!(
            loaded.surface.background,
            Some(ColorSpec::Name("#336699".into()))
        );
    }

    #[test]
    fn default_file_is_written_once_at_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkboard").join("config.toml");

        Config::create_default_file_at(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.drawing.default_width, 5.0);

        let err = Config::create_default_file_at(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn load_from_reports_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[drawing\ndefault_width = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }
}
