//! PNG export of the composited drawing.
//!
//! The drawing thread renders a snapshot and encodes it to PNG bytes; a background
//! worker writes the bytes to a timestamped file in the cache directory and hands the
//! saved file to a share target. Completion is reported as an [`ExportOutcome`].

pub mod dependencies;
pub mod encode;
pub mod file;
pub mod types;

mod manager;
mod pipeline;

pub use dependencies::{ExportDependencies, ExportFileSaver, LogShareTarget, ShareTarget};
pub use encode::encode_png;
pub use file::FileSaveConfig;
pub use manager::{ExportManager, ExportTicket};
pub use types::{ExportError, ExportOutcome, ExportResult, ExportStatus};
