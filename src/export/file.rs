//! File saving for exported drawings.

use super::types::ExportError;
use crate::config::ExportConfig;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save exports to.
    pub save_directory: PathBuf,
    /// Prefix placed before the unix timestamp.
    pub filename_prefix: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for FileSaveConfig {
    fn from(config: &ExportConfig) -> Self {
        Self {
            save_directory: config.resolved_directory(),
            filename_prefix: config.filename_prefix.clone(),
            format: "png".to_string(),
        }
    }
}

/// Generate a filename from the prefix and the current unix time in seconds.
///
/// # Arguments
/// * `prefix` - Text placed before the timestamp
/// * `format` - File extension (e.g., "png")
pub fn generate_filename(prefix: &str, format: &str) -> String {
    format!("{}{}.{}", prefix, Utc::now().timestamp(), format)
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save PNG bytes to a timestamped file.
///
/// A partially written file is removed before the error is returned.
///
/// # Returns
/// Path to the saved file
pub fn save_png(image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&config.save_directory)?;

    let filename = generate_filename(&config.filename_prefix, &config.format);
    let file_path = directory.join(&filename);

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    if let Err(err) = write_file(&file_path, image_data) {
        if file_path.exists() {
            if let Err(remove_err) = fs::remove_file(&file_path) {
                log::warn!(
                    "Failed to remove partial export {}: {}",
                    file_path.display(),
                    remove_err
                );
            }
        }
        return Err(err.into());
    }

    log::info!("Drawing saved successfully: {}", file_path.display());

    Ok(file_path)
}

fn write_file(file_path: &Path, image_data: &[u8]) -> std::io::Result<()> {
    fs::write(file_path, image_data)?;

    let written_size = fs::metadata(file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(file_path, Permissions::from_mode(0o600))?;
    }

    Ok(())
}
