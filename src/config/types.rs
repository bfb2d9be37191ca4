//! Configuration type definitions.

use super::enums::ColorSpec;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool settings a board starts with. The width and color can be
/// changed at runtime through tool selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default pen color - a named color, a hex string like `"#000000"`, or an
    /// RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen width in surface pixels (valid range: 0.5 - 100.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Brush size presets offered by the size picker
    #[serde(default = "default_brush_sizes")]
    pub brush_sizes: Vec<f64>,

    /// Color the eraser paints with (it paints over strokes, it does not remove them)
    #[serde(default = "default_eraser_color")]
    pub eraser_color: ColorSpec,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            brush_sizes: default_brush_sizes(),
            eraser_color: default_eraser_color(),
        }
    }
}

/// Drawing surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Layout width in display units
    #[serde(default = "default_surface_width")]
    pub width: f64,

    /// Layout height in display units
    #[serde(default = "default_surface_height")]
    pub height: f64,

    /// Backing pixels per display unit (valid range: 0.5 - 4.0)
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,

    /// Fill color painted under the strokes; transparent when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorSpec>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
            device_pixel_ratio: default_device_pixel_ratio(),
            background: None,
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Paint strokes with a single sample as a dot of the stroke width
    #[serde(default = "default_single_point_dots")]
    pub single_point_dots: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            single_point_dots: default_single_point_dots(),
        }
    }
}

/// PNG export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported images are written to (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template using chrono format specifiers; `.png` is appended
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("#000000".to_string())
}

fn default_width() -> f64 {
    5.0
}

fn default_brush_sizes() -> Vec<f64> {
    vec![2.0, 5.0, 10.0, 15.0, 20.0]
}

fn default_eraser_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_surface_width() -> f64 {
    800.0
}

fn default_surface_height() -> f64 {
    600.0
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_single_point_dots() -> bool {
    true
}

fn default_save_directory() -> String {
    "~/Pictures/Inkboard".to_string()
}

fn default_filename_template() -> String {
    "artwork_%Y-%m-%d_%H%M%S".to_string()
}
