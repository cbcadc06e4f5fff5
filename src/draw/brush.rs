//! Current brush settings applied to new strokes.

use super::color::{BLACK, Color};
use crate::config::BrushConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Discrete brush size presets offered by the size picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BrushSize {
    Small,
    Medium,
    Large,
}

impl BrushSize {
    /// Size of this preset in device-independent units.
    pub fn dp(self, config: &BrushConfig) -> f64 {
        match self {
            BrushSize::Small => config.small,
            BrushSize::Medium => config.medium,
            BrushSize::Large => config.large,
        }
    }
}

/// Mutable defaults (color, thickness) used for the next stroke.
///
/// Changes never affect strokes that were already started. Thickness is stored in
/// pixels; callers pass device-independent units, converted with the display density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    color: Color,
    /// Thickness in pixels
    thickness: f64,
    /// Pixels per device-independent unit
    density: f64,
}

impl BrushState {
    /// Creates a brush state. `thickness_dp` is converted using `density`.
    pub fn new(color: Color, thickness_dp: f64, density: f64) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            log::warn!("Invalid display density {density}, using 1.0");
            1.0
        };
        let mut brush = Self {
            color,
            thickness: density,
            density,
        };
        brush.set_thickness(thickness_dp);
        brush
    }

    /// Stores a new thickness given in device-independent units.
    ///
    /// Sizes that are non-positive, or not finite once converted to pixels, are
    /// rejected and the previous thickness is kept.
    pub fn set_thickness(&mut self, dp: f64) {
        let px = dp * self.density;
        if !px.is_finite() || dp <= 0.0 {
            log::warn!("Rejecting brush size {dp}; keeping {:.1}px", self.thickness);
            return;
        }
        self.thickness = px;
        log::debug!("Brush thickness set to {:.1}px ({dp}dp)", self.thickness);
    }

    /// Applies one of the size presets.
    pub fn set_size(&mut self, size: BrushSize, config: &BrushConfig) {
        self.set_thickness(size.dp(config));
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Current thickness in pixels.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn density(&self) -> f64 {
        self.density
    }
}

impl Default for BrushState {
    fn default() -> Self {
        Self::new(BLACK, BrushConfig::default().medium, 1.0)
    }
}
