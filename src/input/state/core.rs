//! Gesture state machine and input state management.

use crate::config::BrushConfig;
use crate::draw::{BrushSize, BrushState, Color, Point, StrokeHistory};

/// Current gesture state.
///
/// Tracks whether a finger is down. The press position is held back as an anchor
/// and only becomes part of the stroke once the finger actually moves, so a tap
/// without movement never commits a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawingState {
    /// No finger down
    Idle,
    /// Finger down, stroke in progress
    Drawing {
        /// Where the finger went down
        anchor: Point,
        /// Whether the anchor has been pushed into the stroke yet
        extended: bool,
    },
}

/// Owner of the drawing state: stroke history, brush state and gesture state.
///
/// Touch events are delivered serially on the owning thread and processed
/// synchronously, so no locking is involved. Renderers only borrow the history.
pub struct InputState {
    /// Committed strokes, undo list and the in-progress stroke
    pub(super) history: StrokeHistory,
    /// Color and thickness applied to the next stroke
    pub(super) brush: BrushState,
    /// Brush size presets (device-independent units)
    pub(super) brush_sizes: BrushConfig,
    /// Gesture state machine
    pub state: DrawingState,
    /// Whether the view needs to be redrawn
    pub needs_redraw: bool,
}

impl InputState {
    /// Creates an input state with the given brush and size presets.
    pub fn new(brush: BrushState, brush_sizes: BrushConfig) -> Self {
        Self {
            history: StrokeHistory::new(),
            brush,
            brush_sizes,
            state: DrawingState::Idle,
            needs_redraw: true,
        }
    }

    /// Read access to the stroke history for rendering.
    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    /// Removes the most recent stroke. Ignored when there is nothing to undo.
    pub fn undo(&mut self) {
        if let Some(stroke) = self.history.undo() {
            log::debug!("Undid stroke with {} points", stroke.points().len());
            self.needs_redraw = true;
        }
    }

    /// Starts over with an empty history, keeping the brush.
    pub fn clear(&mut self) {
        self.history.clear();
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
    }

    /// Selects one of the brush size presets for future strokes.
    pub fn set_brush_size(&mut self, size: BrushSize) {
        self.brush.set_size(size, &self.brush_sizes);
    }

    /// Sets the brush thickness in device-independent units.
    pub fn set_brush_thickness(&mut self, dp: f64) {
        self.brush.set_thickness(dp);
    }

    /// Sets the color used for future strokes.
    pub fn set_color(&mut self, color: Color) {
        self.brush.set_color(color);
    }

    /// Current brush color, used to pre-populate the color picker.
    pub fn color(&self) -> Color {
        self.brush.color()
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
