//! Storage permission gate consulted before importing or exporting images.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Answer to a storage permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Storage permission denied")]
    PermissionDenied,
}

/// Host-provided storage permission check.
pub trait StorageAccess {
    /// Whether storage access is already available.
    fn is_granted(&self) -> bool;

    /// Asks for storage access. May block on the host's permission flow.
    fn request(&self) -> PermissionStatus;
}

/// Checks storage access, requesting it once if missing.
///
/// Proceeds when access was already granted or the request is granted; a denied
/// request aborts the caller with [`AccessError::PermissionDenied`].
pub fn ensure_storage_access(access: &dyn StorageAccess) -> Result<(), AccessError> {
    if access.is_granted() {
        return Ok(());
    }

    log::info!("Storage access missing, requesting permission");
    match access.request() {
        PermissionStatus::Granted => {
            log::debug!("Storage permission granted");
            Ok(())
        }
        PermissionStatus::Denied => {
            log::warn!("Storage permission denied; operation aborted");
            Err(AccessError::PermissionDenied)
        }
    }
}

/// Desktop storage access backed by a directory on disk.
///
/// Access counts as granted when the directory exists and is writable. A request
/// tries to create the directory.
#[derive(Debug, Clone)]
pub struct DirectoryAccess {
    directory: PathBuf,
}

impl DirectoryAccess {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl StorageAccess for DirectoryAccess {
    fn is_granted(&self) -> bool {
        fs::metadata(&self.directory).is_ok_and(|meta| meta.is_dir() && !meta.permissions().readonly())
    }

    fn request(&self) -> PermissionStatus {
        match fs::create_dir_all(&self.directory) {
            Ok(()) if self.is_granted() => PermissionStatus::Granted,
            Ok(()) => PermissionStatus::Denied,
            Err(err) => {
                log::warn!(
                    "Cannot create storage directory {}: {}",
                    self.directory.display(),
                    err
                );
                PermissionStatus::Denied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct MockAccess {
        granted: bool,
        answer: PermissionStatus,
        requests: Cell<usize>,
    }

    impl MockAccess {
        fn new(granted: bool, answer: PermissionStatus) -> Self {
            Self {
                granted,
                answer,
                requests: Cell::new(0),
            }
        }
    }

    impl StorageAccess for MockAccess {
        fn is_granted(&self) -> bool {
            self.granted
        }

        fn request(&self) -> PermissionStatus {
            self.requests.set(self.requests.get() + 1);
            self.answer
        }
    }

    #[test]
    fn granted_access_skips_request() {
        let access = MockAccess::new(true, PermissionStatus::Denied);
        assert_eq!(ensure_storage_access(&access), Ok(()));
        assert_eq!(access.requests.get(), 0);
    }

    #[test]
    fn granted_request_proceeds() {
        let access = MockAccess::new(false, PermissionStatus::Granted);
        assert_eq!(ensure_storage_access(&access), Ok(()));
        assert_eq!(access.requests.get(), 1);
    }

    #[test]
    fn denied_request_aborts() {
        let access = MockAccess::new(false, PermissionStatus::Denied);
        assert_eq!(
            ensure_storage_access(&access),
            Err(AccessError::PermissionDenied)
        );
        assert_eq!(access.requests.get(), 1);
    }

    #[test]
    fn directory_access_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let access = DirectoryAccess::new(dir.path().join("exports"));
        assert!(!access.is_granted());
        assert_eq!(ensure_storage_access(&access), Ok(()));
        assert!(dir.path().join("exports").is_dir());
    }

    #[test]
    fn directory_access_denied_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, b"x").unwrap();
        let access = DirectoryAccess::new(&file);
        assert_eq!(access.request(), PermissionStatus::Denied);
    }
}
