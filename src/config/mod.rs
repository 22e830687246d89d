//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the
//! configuration file at `~/.config/sketchboard/config.toml`. Settings cover
//! drawing defaults, surface dimensions, export paths, and texture assets.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

// Re-export commonly used types at module level
pub use types::{AssetConfig, ColorSpec, DrawingConfig, ExportConfig, SurfaceConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all user settings.
///
/// This is the root type deserialized from the TOML file. All fields have
/// defaults and fall back to them when not specified.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "pink"
/// default_stroke_width = 8.0
/// background_color = "white"
///
/// [surface]
/// width = 1280
/// height = 720
///
/// [export]
/// directory = "~/Pictures/sketchboard"
///
/// [assets]
/// texture_directory = "~/.local/share/sketchboard/textures"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing tool defaults (brush color, stroke width, shape kind)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Offscreen surface dimensions for the headless host
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Export sink settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Texture asset settings
    #[serde(default)]
    pub assets: AssetConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged.
    ///
    /// Validated ranges:
    /// - `default_stroke_width`: 1.0 - 64.0
    /// - `surface.width`/`surface.height`: 16 - 8192
    /// - `default_shape`: one of the four shape kinds
    /// - `filename_template`: non-empty
    fn validate_and_clamp(&mut self) {
        if !(1.0..=64.0).contains(&self.drawing.default_stroke_width) {
            log::warn!(
                "Invalid default_stroke_width {:.1}, clamping to 1.0-64.0 range",
                self.drawing.default_stroke_width
            );
            self.drawing.default_stroke_width = self.drawing.default_stroke_width.clamp(1.0, 64.0);
        }

        if !(16..=8192).contains(&self.surface.width) {
            log::warn!(
                "Invalid surface width {}, clamping to 16-8192 range",
                self.surface.width
            );
            self.surface.width = self.surface.width.clamp(16, 8192);
        }

        if !(16..=8192).contains(&self.surface.height) {
            log::warn!(
                "Invalid surface height {}, clamping to 16-8192 range",
                self.surface.height
            );
            self.surface.height = self.surface.height.clamp(16, 8192);
        }

        if self
            .drawing
            .default_shape
            .parse::<crate::draw::ShapeKind>()
            .is_err()
        {
            log::warn!(
                "Invalid default_shape '{}', falling back to 'freestyle'",
                self.drawing.default_shape
            );
            self.drawing.default_shape = "freestyle".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, falling back to default");
            self.export.filename_template =
                crate::export::PngExporter::DEFAULT_TEMPLATE.to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
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

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{PINK, WHITE};

    #[test]
    fn defaults_are_valid_without_a_file() {
        let mut config = Config::default();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_color.to_color(), PINK);
        assert_eq!(config.drawing.background_color.to_color(), WHITE);
        assert_eq!(config.drawing.default_stroke_width, 8.0);
        assert_eq!(config.surface.width, 1280);
        assert_eq!(config.surface.height, 720);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            default_stroke_width = 500.0
            default_shape = "triangle"

            [surface]
            width = 4
            height = 100000
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_stroke_width, 64.0);
        assert_eq!(config.drawing.default_shape, "freestyle");
        assert_eq!(config.surface.width, 16);
        assert_eq!(config.surface.height, 8192);
    }

    #[test]
    fn rgb_color_spec_converts_to_unit_range() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            default_color = [255, 0, 0]
            "#,
        )
        .unwrap();

        let color = config.drawing.default_color.to_color();
        assert_eq!((color.r, color.g, color.b, color.a), (1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn unknown_color_name_falls_back_to_pink() {
        let spec = ColorSpec::Name("mauve".to_string());
        assert_eq!(spec.to_color(), PINK);
    }
}
