//! Configuration type definitions.

use crate::draw::color::PINK;
use crate::draw::{Color, name_to_color};
use crate::export::PngExporter;
use log::warn;
use serde::{Deserialize, Serialize};

/// Color specification - either a named palette color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named palette color (red, green, blue, ..., lime)
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to a [`Color`].
    ///
    /// Unknown color names fall back to pink with a warning. RGB arrays are
    /// converted from 0-255 range to 0.0-1.0 with full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using pink", name);
                PINK
            }),
            ColorSpec::Rgb([r, g, b]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            },
        }
    }
}

/// Drawing tool defaults.
///
/// Controls the tool state a fresh surface starts with; hosts change these
/// at runtime through the selection operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Initial brush color - a palette name or an RGB array
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Surface background color, also used by clear()
    #[serde(default = "default_background")]
    pub background_color: ColorSpec,

    /// Initial stroke width in pixels (valid range: 1.0 - 64.0)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: f64,

    /// Initial shape kind (freestyle, circle, line, rectangle)
    #[serde(default = "default_shape")]
    pub default_shape: String,

    /// Start with randomized per-stroke coloring enabled
    #[serde(default)]
    pub random_color: bool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            background_color: default_background(),
            default_stroke_width: default_stroke_width(),
            default_shape: default_shape(),
            random_color: false,
        }
    }
}

/// Offscreen surface dimensions used by the headless host.
#[derive(Debug, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface width in pixels (valid range: 16 - 8192)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Surface height in pixels (valid range: 16 - 8192)
    #[serde(default = "default_height")]
    pub height: i32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Export sink settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory saved drawings land in; defaults to `<pictures>/sketchboard`
    #[serde(default)]
    pub directory: Option<String>,

    /// Filename template (chrono format specifiers, `.png` appended)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filename_template: default_filename_template(),
        }
    }
}

/// Texture asset settings.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AssetConfig {
    /// Directory texture names resolve against (`<dir>/<name>.png`)
    #[serde(default)]
    pub texture_directory: Option<String>,
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("pink".to_string())
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_stroke_width() -> f64 {
    8.0
}

fn default_shape() -> String {
    "freestyle".to_string()
}

fn default_width() -> i32 {
    1280
}

fn default_height() -> i32 {
    720
}

fn default_filename_template() -> String {
    PngExporter::DEFAULT_TEMPLATE.to_string()
}
