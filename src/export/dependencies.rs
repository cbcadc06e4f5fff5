use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;

use crate::export::{
    file::{self, FileSaveConfig},
    types::ExportError,
};

/// Abstraction over writing encoded images to storage.
pub trait ExportFileSaver: Send + Sync {
    fn save(&self, image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError>;
}

/// Abstraction over handing a saved image to an external share mechanism.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, path: &Path) -> Result<(), ExportError>;
}

/// Bundle of dependencies used by the export pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub saver: Arc<dyn ExportFileSaver>,
    pub share: Arc<dyn ShareTarget>,
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            saver: Arc::new(DefaultFileSaver),
            share: Arc::new(LogShareTarget),
        }
    }
}

struct DefaultFileSaver;

/// Share target for hosts without a share sheet: announces the file in the log.
pub struct LogShareTarget;

impl ExportFileSaver for DefaultFileSaver {
    fn save(&self, image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError> {
        file::save_png(image_data, config)
    }
}

#[async_trait]
impl ShareTarget for LogShareTarget {
    async fn share(&self, path: &Path) -> Result<(), ExportError> {
        if !path.is_file() {
            return Err(ExportError::Share(format!(
                "{} is not a file",
                path.display()
            )));
        }
        log::info!("Drawing ready to share (image/png): {}", path.display());
        Ok(())
    }
}
