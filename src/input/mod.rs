//! Input handling and stroke construction.
//!
//! This module translates touch events from the hosting view into stroke
//! construction calls. It owns the stroke history and the brush state, and models
//! the color picker's pending selection.

pub mod color_picker;
pub mod events;
pub mod state;

// Re-export commonly used types at module level
pub use color_picker::{Channel, ColorPicker};
pub use events::TouchEvent;
pub use state::{DrawingState, InputState};
