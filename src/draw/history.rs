//! Stroke history with one-directional undo.

use super::color::Color;
use super::stroke::{Point, Stroke};

/// Ordered record of committed strokes plus the stroke currently being drawn.
///
/// Committed strokes are rendered oldest-first so later strokes paint over earlier
/// ones. Undone strokes are moved to a separate list that is only ever appended to;
/// there is no redo.
#[derive(Debug, Clone)]
pub struct StrokeHistory {
    /// Committed strokes in commit order (first = bottom layer)
    strokes: Vec<Stroke>,
    /// Strokes removed by undo, most recently undone last
    undone: Vec<Stroke>,
    /// Stroke being built by the current gesture (empty between gestures)
    in_progress: Option<Stroke>,
}

impl Default for StrokeHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeHistory {
    /// Creates an empty history with no stroke in progress.
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
            undone: Vec::new(),
            in_progress: None,
        }
    }

    /// Starts a new empty in-progress stroke.
    ///
    /// Any unfinished in-progress stroke is discarded without being committed.
    pub fn begin_stroke(&mut self, color: Color, thickness: f64) {
        if self.in_progress.as_ref().is_some_and(|s| !s.is_empty()) {
            log::debug!("Discarding unfinished stroke");
        }
        self.in_progress = Some(Stroke::new(color, thickness));
    }

    /// Appends a point to the in-progress stroke. No-op when nothing is in progress.
    pub fn extend_stroke(&mut self, point: Point) {
        if let Some(stroke) = self.in_progress.as_mut() {
            stroke.push(point);
        }
    }

    /// Seals the in-progress stroke into history if it has any points.
    ///
    /// A fresh empty in-progress stroke using `next_color`/`next_thickness` is always
    /// left behind, ready for the next gesture.
    ///
    /// Returns `true` if a stroke was committed.
    pub fn end_stroke(&mut self, next_color: Color, next_thickness: f64) -> bool {
        let finished = self
            .in_progress
            .replace(Stroke::new(next_color, next_thickness));

        match finished {
            Some(stroke) if !stroke.is_empty() => {
                self.strokes.push(stroke);
                true
            }
            _ => false,
        }
    }

    /// Moves the most recently committed stroke to the undo list.
    ///
    /// Returns the undone stroke, or `None` when the history is empty.
    pub fn undo(&mut self) -> Option<&Stroke> {
        let stroke = self.strokes.pop()?;
        self.undone.push(stroke);
        self.undone.last()
    }

    /// Strokes to paint this frame: committed strokes in commit order, then the
    /// in-progress stroke when it has points.
    pub fn render_items(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().chain(
            self.in_progress
                .as_ref()
                .filter(|stroke| !stroke.is_empty()),
        )
    }

    /// Committed strokes in commit order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Undone strokes, most recently undone last.
    pub fn undone(&self) -> &[Stroke] {
        &self.undone
    }

    /// The in-progress stroke, if one has been started.
    pub fn in_progress(&self) -> Option<&Stroke> {
        self.in_progress.as_ref()
    }

    /// Number of committed strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Drops every committed, undone and in-progress stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.undone.clear();
        self.in_progress = None;
    }
}
