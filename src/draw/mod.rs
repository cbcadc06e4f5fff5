//! Stroke model and Cairo-based rendering.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Stroke`]: one freehand line with its own color and thickness
//! - [`StrokeHistory`]: committed strokes, the undo list and the in-progress stroke
//! - [`BrushState`]: color and thickness applied to the next stroke
//! - [`CanvasSurface`]: off-screen raster that composites everything per frame
//! - Rendering functions for Cairo-based output

pub mod background;
pub mod brush;
pub mod color;
pub mod history;
pub mod render;
pub mod stroke;
pub mod surface;

// Re-export commonly used types at module level
pub use background::{BackgroundError, BackgroundImage};
pub use brush::{BrushSize, BrushState};
pub use color::Color;
pub use history::StrokeHistory;
pub use render::{render_stroke, render_strokes};
pub use stroke::{Point, Stroke};
pub use surface::CanvasSurface;
