//! Library exports for the doodlepad drawing core.
//!
//! Exposes the stroke model, the input controller, canvas compositing and the export
//! pipeline so hosting views (and the `doodlepad` CLI) can drive a drawing session.

pub mod access;
pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod script;
pub mod session;

pub use config::Config;
pub use session::{DrawingSession, ImagePicker, ImportError};
