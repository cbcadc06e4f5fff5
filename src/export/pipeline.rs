use std::{fmt, path::PathBuf, sync::Arc};

use crate::export::{
    dependencies::{ExportDependencies, ExportFileSaver},
    file::FileSaveConfig,
    types::{ExportError, ExportResult},
};
use tokio::task;

#[derive(Clone)]
pub(crate) struct ExportRequest {
    pub(crate) png_data: Vec<u8>,
    pub(crate) save_config: FileSaveConfig,
    pub(crate) share: bool,
}

impl fmt::Debug for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportRequest")
            .field("png_bytes", &self.png_data.len())
            .field("save_directory", &self.save_config.save_directory)
            .field("share", &self.share)
            .finish()
    }
}

pub(crate) async fn perform_export(
    request: ExportRequest,
    dependencies: Arc<ExportDependencies>,
) -> Result<ExportResult, ExportError> {
    log::info!("Starting export: {:?}", request);

    let ExportRequest {
        png_data,
        save_config,
        share,
    } = request;

    let path = save_image(Arc::clone(&dependencies.saver), png_data, save_config).await?;

    let shared = if share {
        match dependencies.share.share(&path).await {
            Ok(()) => {
                log::info!("Handed {} to share target", path.display());
                true
            }
            Err(e) => {
                log::error!("Failed to share {}: {}", path.display(), e);
                false
            }
        }
    } else {
        log::debug!("Share not requested for this export");
        false
    };

    Ok(ExportResult { path, shared })
}

async fn save_image(
    saver: Arc<dyn ExportFileSaver>,
    image_data: Vec<u8>,
    config: FileSaveConfig,
) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || saver.save(&image_data, &config))
        .await
        .map_err(|e| ExportError::Task(format!("Save task failed: {}", e)))?
}
