mod core;
mod touch;

pub use core::{DrawingState, InputState};
