use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, oneshot};

use crate::export::{
    dependencies::ExportDependencies,
    file::FileSaveConfig,
    pipeline::{ExportRequest, perform_export},
    types::{ExportError, ExportOutcome, ExportStatus},
};

type QueuedExport = (ExportRequest, oneshot::Sender<ExportOutcome>);

/// Completion signal for one export request.
///
/// Resolves once the background worker has saved (or failed to save) the image.
#[derive(Debug)]
pub struct ExportTicket {
    reply_rx: oneshot::Receiver<ExportOutcome>,
}

impl ExportTicket {
    /// Waits for the export to finish.
    pub async fn wait(self) -> ExportOutcome {
        self.reply_rx.await.unwrap_or_else(|_| {
            ExportOutcome::Failed(ExportError::ManagerStopped.to_string())
        })
    }

    /// Returns the outcome if the export has finished, without waiting.
    pub fn try_outcome(&mut self) -> Option<ExportOutcome> {
        match self.reply_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(ExportOutcome::Failed(
                ExportError::ManagerStopped.to_string(),
            )),
        }
    }
}

/// Shared state for managing background export operations.
///
/// Bridges the synchronous drawing thread, which only hands over encoded bytes,
/// with the async worker that writes and shares them.
#[derive(Clone)]
pub struct ExportManager {
    /// Channel for sending export requests.
    request_tx: mpsc::UnboundedSender<QueuedExport>,
    /// Shared status of the current export operation.
    status: Arc<Mutex<ExportStatus>>,
    /// Shared outcome of the last export (if any).
    last_outcome: Arc<Mutex<Option<ExportOutcome>>>,
}

impl ExportManager {
    /// Create a new export manager.
    ///
    /// This spawns a background task that processes export requests in order.
    ///
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime handle for spawning async tasks
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        Self::with_dependencies(runtime_handle, ExportDependencies::default())
    }

    /// Create an export manager with custom dependencies (useful for testing).
    pub fn with_dependencies(
        runtime_handle: &tokio::runtime::Handle,
        dependencies: ExportDependencies,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<QueuedExport>();
        let status = Arc::new(Mutex::new(ExportStatus::Idle));
        let last_outcome = Arc::new(Mutex::new(None));
        let dependencies = Arc::new(dependencies);

        let status_clone = status.clone();
        let outcome_clone = last_outcome.clone();
        let deps_clone = dependencies.clone();

        runtime_handle.spawn(async move {
            while let Some((request, reply_tx)) = request_rx.recv().await {
                log::debug!("Processing export request: {:?}", request);

                *status_clone.lock().await = ExportStatus::Saving;

                let outcome = match perform_export(request, deps_clone.clone()).await {
                    Ok(result) => {
                        log::info!("Export successful: {}", result.path.display());
                        *status_clone.lock().await = ExportStatus::Success;
                        ExportOutcome::Success(result)
                    }
                    Err(e) => {
                        let error_message = e.to_string();
                        log::error!("Export failed: {}", error_message);
                        *status_clone.lock().await = ExportStatus::Failed(error_message.clone());
                        ExportOutcome::Failed(error_message)
                    }
                };

                *outcome_clone.lock().await = Some(outcome.clone());
                if reply_tx.send(outcome).is_err() {
                    log::debug!("Export ticket dropped before completion");
                }
            }
        });

        Self {
            request_tx,
            status,
            last_outcome,
        }
    }

    /// Request that encoded PNG bytes be saved, and optionally shared.
    ///
    /// This is non-blocking and returns immediately. The returned ticket resolves
    /// when the background worker is done.
    pub fn request_export(
        &self,
        png_data: Vec<u8>,
        save_config: FileSaveConfig,
        share: bool,
    ) -> Result<ExportTicket, ExportError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = ExportRequest {
            png_data,
            save_config,
            share,
        };

        self.request_tx
            .send((request, reply_tx))
            .map_err(|_| ExportError::ManagerStopped)?;

        Ok(ExportTicket { reply_rx })
    }

    /// Get the current export status.
    pub async fn get_status(&self) -> ExportStatus {
        self.status.lock().await.clone()
    }

    /// Get the outcome of the last export and clear it.
    pub async fn take_outcome(&self) -> Option<ExportOutcome> {
        self.last_outcome.lock().await.take()
    }

    /// Try to get the outcome without waiting (non-blocking).
    pub fn try_take_outcome(&self) -> Option<ExportOutcome> {
        self.last_outcome.try_lock().ok().and_then(|mut r| r.take())
    }

    /// Reset status to idle.
    pub async fn reset(&self) {
        *self.status.lock().await = ExportStatus::Idle;
    }
}

#[cfg(test)]
impl ExportManager {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<QueuedExport>();
        drop(rx);
        Self {
            request_tx: tx,
            status: Arc::new(Mutex::new(ExportStatus::Idle)),
            last_outcome: Arc::new(Mutex::new(None)),
        }
    }
}
