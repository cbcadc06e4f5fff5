use crate::draw::Point;
use crate::input::events::TouchEvent;

use super::{DrawingState, InputState};

impl InputState {
    /// Processes one touch event.
    ///
    /// Returns `true` if the event was consumed. Unrecognised event kinds are
    /// ignored and reported as not consumed.
    pub fn handle_touch(&mut self, event: TouchEvent) -> bool {
        match event {
            TouchEvent::Press { x, y } => self.on_touch_press(Point::new(x, y)),
            TouchEvent::Move { x, y } => self.on_touch_move(Point::new(x, y)),
            TouchEvent::Release => self.on_touch_release(),
            TouchEvent::Other => return false,
        }
        true
    }

    /// Finger down: start a fresh stroke with the current brush.
    ///
    /// A stroke left unfinished by a missing release is discarded.
    pub fn on_touch_press(&mut self, point: Point) {
        self.history
            .begin_stroke(self.brush.color(), self.brush.thickness());
        self.state = DrawingState::Drawing {
            anchor: point,
            extended: false,
        };
        self.needs_redraw = true;
    }

    /// Finger moved: grow the in-progress stroke. Ignored when no finger is down.
    pub fn on_touch_move(&mut self, point: Point) {
        if let DrawingState::Drawing { anchor, extended } = &mut self.state {
            if !*extended {
                self.history.extend_stroke(*anchor);
                *extended = true;
            }
            self.history.extend_stroke(point);
            self.needs_redraw = true;
        }
    }

    /// Finger lifted: seal the stroke into history if it has points.
    pub fn on_touch_release(&mut self) {
        if !matches!(self.state, DrawingState::Drawing { .. }) {
            return;
        }

        let committed = self
            .history
            .end_stroke(self.brush.color(), self.brush.thickness());
        if committed {
            log::debug!("Committed stroke #{}", self.history.len());
        }
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
    }
}
