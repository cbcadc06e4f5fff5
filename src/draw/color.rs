//! RGBA color type and predefined color constants.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum), which is what
/// Cairo's `set_source_rgba` expects.
///
/// # Examples
///
/// ```
/// use doodlepad::draw::Color;
/// let red = Color::from_rgb8(255, 0, 0);
/// assert_eq!(red.to_rgb8(), [255, 0, 0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components in the 0.0-1.0 range.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels, as produced by the color sliders.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, u8::MAX)
    }

    /// Creates a color from 8-bit RGBA channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Returns the RGB channels scaled to 0-255 (used to pre-populate the sliders).
    pub fn to_rgb8(&self) -> [u8; 3] {
        [channel_to_u8(self.r), channel_to_u8(self.g), channel_to_u8(self.b)]
    }

    /// Returns all four channels scaled to 0-255.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.to_rgb8();
        [r, g, b, channel_to_u8(self.a)]
    }

    /// Sets this color as the source of the given Cairo context.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Predefined white color, also the default canvas fill.
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Predefined black color, the initial brush color.
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Fully transparent color.
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
/// Names are case-insensitive: "red", "green", "blue", "white", "black".
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_conversion_preserves_channels() {
        let color = Color::from_rgb8(12, 200, 255);
        assert_eq!(color.to_rgb8(), [12, 200, 255]);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn out_of_range_components_are_clamped_when_converting() {
        let color = Color::new(1.5, -0.2, 0.5, 2.0);
        assert_eq!(color.to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(name_to_color("Black"), Some(BLACK));
        assert_eq!(name_to_color("RED"), Some(RED));
        assert_eq!(name_to_color("mauve"), None);
    }
}
