//! Data types for image export.

use crate::access::AccessError;
use std::path::PathBuf;
use thiserror::Error;

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Where the PNG was written.
    pub path: PathBuf,
    /// Whether the file was handed to the share target.
    pub shared: bool,
}

/// Outcome of an export request, shown to the user by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Success(ExportResult),
    Failed(String),
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Success(_))
    }

    /// Saved file path, if the export succeeded.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ExportOutcome::Success(result) => Some(&result.path),
            ExportOutcome::Failed(_) => None,
        }
    }
}

/// Errors that can occur while exporting the drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to render snapshot: {0}")]
    Render(#[from] cairo::Error),

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to save image: {0}")]
    Save(#[from] std::io::Error),

    #[error("Share failed: {0}")]
    Share(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Export manager not running")]
    ManagerStopped,

    #[error("Export task failed: {0}")]
    Task(String),
}

/// Status of the background export worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// No export requested yet, or status was reset.
    Idle,
    /// Encoded bytes are being written.
    Saving,
    /// Last export completed successfully.
    Success,
    /// Last export failed.
    Failed(String),
}
