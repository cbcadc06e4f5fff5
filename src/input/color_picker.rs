//! Pending color selection for the RGB slider picker.

use crate::draw::Color;

/// One of the three picker sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Model behind the three 0-255 channel sliders.
///
/// The picker is opened with the current brush color. Slider changes only update
/// the preview; the brush is not touched until the selection is confirmed.
#[derive(Debug, Clone, Default)]
pub struct ColorPicker {
    red: u8,
    green: u8,
    blue: u8,
    open: bool,
}

impl ColorPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the picker with its sliders set from `current`.
    pub fn open(&mut self, current: Color) {
        let [red, green, blue] = current.to_rgb8();
        self.red = red;
        self.green = green;
        self.blue = blue;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Moves one slider. Ignored while the picker is closed.
    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        if !self.open {
            return;
        }
        match channel {
            Channel::Red => self.red = value,
            Channel::Green => self.green = value,
            Channel::Blue => self.blue = value,
        }
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Color formed by the current slider positions.
    pub fn preview(&self) -> Color {
        Color::from_rgb8(self.red, self.green, self.blue)
    }

    /// Closes the picker and returns the selected color.
    ///
    /// Returns `None` if the picker was not open.
    pub fn confirm(&mut self) -> Option<Color> {
        if !std::mem::take(&mut self.open) {
            return None;
        }
        Some(self.preview())
    }

    /// Closes the picker without a selection.
    pub fn cancel(&mut self) {
        self.open = false;
    }
}
