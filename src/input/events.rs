//! Touch event types delivered by the hosting view.

use serde::Deserialize;

/// A single touch sample.
///
/// Per gesture the host delivers one `Press`, any number of `Move`s and one
/// `Release`, in that order. Anything else the platform reports (cancel, extra
/// pointers, hover) maps to `Other` and is not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TouchEvent {
    /// Finger down at the given view-local position
    Press { x: f64, y: f64 },
    /// Finger moved while down
    Move { x: f64, y: f64 },
    /// Finger lifted
    Release,
    /// Unrecognised event kind
    #[serde(other)]
    Other,
}
