//! Freehand stroke definition.

use super::color::Color;

/// A position in view-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One continuous freehand line, from touch-down to touch-up.
///
/// Color and thickness are captured when the stroke begins and never change
/// afterwards, so later brush changes are not retroactive.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    color: Color,
    /// Line thickness in pixels
    thickness: f64,
    /// Points in capture order
    points: Vec<Point>,
}

impl Stroke {
    /// Creates an empty stroke with the given appearance.
    pub fn new(color: Color, thickness: f64) -> Self {
        Self {
            color,
            thickness,
            points: Vec::new(),
        }
    }

    /// Creates a stroke from an existing point list.
    pub fn with_points(color: Color, thickness: f64, points: Vec<Point>) -> Self {
        Self {
            color,
            thickness,
            points,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// A stroke with no points is never rendered or committed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}
