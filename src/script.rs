//! Replayable drawing scripts.
//!
//! A script is a JSON array of actions applied to a [`DrawingSession`] in order,
//! standing in for the touch input and toolbar taps of an interactive host:
//!
//! ```json
//! [
//!   { "action": "brush-size", "size": "large" },
//!   { "action": "color", "color": [255, 0, 0] },
//!   { "action": "touch", "kind": "press", "x": 10.0, "y": 10.0 },
//!   { "action": "touch", "kind": "move", "x": 90.0, "y": 40.0 },
//!   { "action": "touch", "kind": "release" },
//!   { "action": "stroke", "points": [[10.0, 80.0], [90.0, 80.0]] },
//!   { "action": "undo" }
//! ]
//! ```

use crate::config::ColorSpec;
use crate::draw::BrushSize;
use crate::draw::color::BLACK;
use crate::input::{Channel, TouchEvent};
use crate::session::DrawingSession;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ScriptAction {
    /// Raw touch event
    Touch(TouchEvent),
    /// Whole gesture: press at the first point, move through the rest, release
    Stroke { points: Vec<[f64; 2]> },
    Undo,
    Clear,
    BrushSize { size: BrushSize },
    /// Thickness in device-independent units
    Thickness { dp: f64 },
    /// Set the brush color directly
    Color { color: ColorSpec },
    /// Pick a color through the RGB picker and confirm it
    PickColor { red: u8, green: u8, blue: u8 },
    Resize { width: i32, height: i32 },
}

/// Counts of what a script run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    /// Touch events the session did not consume
    pub ignored: usize,
}

/// Parses a script from JSON text.
pub fn parse(json: &str) -> Result<Vec<ScriptAction>> {
    serde_json::from_str(json).context("failed to parse drawing script")
}

/// Reads and parses a script file.
pub fn load(path: &Path) -> Result<Vec<ScriptAction>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse(&json).with_context(|| format!("invalid script {}", path.display()))
}

/// Applies `actions` to `session` in order.
pub fn replay(session: &mut DrawingSession, actions: &[ScriptAction]) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for action in actions {
        match action {
            ScriptAction::Touch(event) => {
                if !session.handle_touch(*event) {
                    log::debug!("Touch event not consumed: {:?}", event);
                    summary.ignored += 1;
                    continue;
                }
            }
            ScriptAction::Stroke { points } => {
                let Some(([x, y], rest)) = points.split_first() else {
                    log::warn!("Skipping stroke without points");
                    summary.ignored += 1;
                    continue;
                };
                session.handle_touch(TouchEvent::Press { x: *x, y: *y });
                for [x, y] in rest {
                    session.handle_touch(TouchEvent::Move { x: *x, y: *y });
                }
                session.handle_touch(TouchEvent::Release);
            }
            ScriptAction::Undo => session.undo(),
            ScriptAction::Clear => session.clear(),
            ScriptAction::BrushSize { size } => session.set_brush_size(*size),
            ScriptAction::Thickness { dp } => session.set_brush_thickness(*dp),
            ScriptAction::Color { color } => {
                let fallback = session.input().color();
                session.set_color(color.to_color_or(fallback));
            }
            ScriptAction::PickColor { red, green, blue } => {
                let picker = session.open_color_picker();
                picker.set_channel(Channel::Red, *red);
                picker.set_channel(Channel::Green, *green);
                picker.set_channel(Channel::Blue, *blue);
                let color = session.confirm_color().unwrap_or(BLACK);
                log::debug!("Picked color {:?}", color.to_rgb8());
            }
            ScriptAction::Resize { width, height } => session
                .resize(*width, *height)
                .with_context(|| format!("failed to resize canvas to {width}x{height}"))?,
        }
        summary.applied += 1;
    }

    log::info!(
        "Replayed {} actions ({} ignored), {} strokes in history",
        summary.applied,
        summary.ignored,
        session.history().len()
    );
    Ok(summary)
}
