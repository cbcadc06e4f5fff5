//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::BrushSize;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing-related settings.
///
/// Controls the brush when a drawing session starts. Users change these at runtime
/// through the size and color pickers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial brush color - either a named color (red, green, blue, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Initial brush size preset (small, medium, large)
    #[serde(default = "default_brush_size")]
    pub default_brush_size: BrushSize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_brush_size: default_brush_size(),
        }
    }
}

/// Brush size presets in device-independent units (valid range: 1.0 - 100.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    #[serde(default = "default_small")]
    pub small: f64,

    #[serde(default = "default_medium")]
    pub medium: f64,

    #[serde(default = "default_large")]
    pub large: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            small: default_small(),
            medium: default_medium(),
            large: default_large(),
        }
    }
}

/// Display metrics.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisplayConfig {
    /// Pixels per device-independent unit (valid range: 0.5 - 4.0)
    /// - 1.0 = mdpi (160 dpi)
    /// - 2.0 = xhdpi (320 dpi)
    #[serde(default = "default_density")]
    pub density: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
        }
    }
}

/// Canvas compositing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Fill painted behind the background image and strokes (also used for export)
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Bake committed strokes into the raster buffer instead of replaying them
    /// every frame. Flattened content is lost when the canvas is resized.
    #[serde(default)]
    pub flatten_strokes: bool,

    /// Canvas width used when no host view size is known yet
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Canvas height used when no host view size is known yet
    #[serde(default = "default_canvas_height")]
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            flatten_strokes: false,
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory exported PNGs are written to. Defaults to the user cache
    /// directory (`~/.cache/doodlepad` on Linux)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Prefix of exported file names; the unix timestamp and `.png` follow
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,

    /// Hand the saved file to the share target after a successful export
    #[serde(default = "default_share_after_save")]
    pub share_after_save: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filename_prefix: default_filename_prefix(),
            share_after_save: default_share_after_save(),
        }
    }
}

impl ExportConfig {
    /// Resolved export directory.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("doodlepad")
        })
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_size() -> BrushSize {
    BrushSize::Medium
}

fn default_small() -> f64 {
    10.0
}

fn default_medium() -> f64 {
    20.0
}

fn default_large() -> f64 {
    30.0
}

fn default_density() -> f64 {
    1.0
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_canvas_width() -> i32 {
    1080
}

fn default_canvas_height() -> i32 {
    1920
}

fn default_filename_prefix() -> String {
    "DrawingApp_".to_string()
}

fn default_share_after_save() -> bool {
    true
}
