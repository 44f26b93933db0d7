//! Storage Access Abstractions
//!
//! Provides host-agnostic traits for enumerating and inspecting media files,
//! whether they live on a locally mounted filesystem or inside an externally
//! managed library exposed through a remote catalog API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BridgeError, Result};

/// Metadata for one file observed on storage.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMeta {
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub is_directory: bool,
}

/// Read-only disk access trait.
///
/// Abstracts filesystem enumeration so the scan pipeline can run against
/// real mounts, network storage, or in-memory fixtures in tests. All
/// operations are read only; nothing in the engine writes to storage.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::DiskProvider;
///
/// async fn count_files(disk: &dyn DiskProvider, root: &std::path::Path) -> usize {
///     disk.list_files(root, true).await.map(|f| f.len()).unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait DiskProvider: Send + Sync {
    /// Check whether a directory exists.
    async fn folder_exists(&self, path: &Path) -> Result<bool>;

    /// Check whether an existing directory contains no entries at all.
    async fn folder_empty(&self, path: &Path) -> Result<bool>;

    /// Get size and modification time for a single file.
    async fn file_info(&self, path: &Path) -> Result<FileMeta>;

    /// List all files under `path`.
    ///
    /// With `recursive` set, descends into every subdirectory; otherwise
    /// only the top level is listed. Directories themselves are not
    /// returned, only files.
    async fn list_files(&self, path: &Path, recursive: bool) -> Result<Vec<PathBuf>>;
}

/// Desktop `DiskProvider` backed by `tokio::fs`.
#[derive(Debug, Default, Clone)]
pub struct LocalDisk;

#[async_trait]
impl DiskProvider for LocalDisk {
    async fn folder_exists(&self, path: &Path) -> Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn folder_empty(&self, path: &Path) -> Result<bool> {
        let mut entries = tokio::fs::read_dir(path).await?;
        Ok(entries.next_entry().await?.is_none())
    }

    async fn file_info(&self, path: &Path) -> Result<FileMeta> {
        let meta = tokio::fs::metadata(path).await?;
        let modified = meta.modified()?;
        Ok(FileMeta {
            size: meta.len(),
            modified: DateTime::<Utc>::from(modified),
            is_directory: meta.is_dir(),
        })
    }

    async fn list_files(&self, path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![path.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let entry_path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    if recursive {
                        pending.push(entry_path);
                    }
                } else {
                    files.push(entry_path);
                }
            }
        }

        Ok(files)
    }
}

/// Connection settings for an externally managed library server.
///
/// Carried by root folders whose enumeration is delegated to a remote
/// catalog rather than performed directly on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedLibrarySettings {
    /// Base URL of the managing server's API.
    pub endpoint: String,
    /// Optional API key for authenticated access.
    pub api_key: Option<String>,
    /// Named library on the server, when it hosts more than one.
    pub library_name: Option<String>,
}

/// Enumeration provider for externally managed libraries.
///
/// Implementations query the managing server for every file path it knows
/// about; the scan pipeline then narrows the result to the folder being
/// scanned and stats each path through a [`DiskProvider`]. Fetch failures
/// surface as [`BridgeError`] and abort the walk for that folder only.
#[async_trait]
pub trait ManagedLibraryProvider: Send + Sync {
    /// Fetch every file path registered with the managing server.
    async fn all_file_paths(&self, settings: &ManagedLibrarySettings) -> Result<Vec<PathBuf>>;
}

/// Placeholder provider for configurations without a managed-library bridge.
#[derive(Debug, Default, Clone)]
pub struct UnavailableManagedLibrary;

#[async_trait]
impl ManagedLibraryProvider for UnavailableManagedLibrary {
    async fn all_file_paths(&self, _settings: &ManagedLibrarySettings) -> Result<Vec<PathBuf>> {
        Err(BridgeError::NotAvailable(
            "ManagedLibraryProvider".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_local_disk_folder_exists() {
        let dir = tempfile::tempdir().unwrap();
        let disk = LocalDisk;

        assert!(disk.folder_exists(dir.path()).await.unwrap());
        assert!(!disk
            .folder_exists(&dir.path().join("missing"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_local_disk_folder_empty() {
        let dir = tempfile::tempdir().unwrap();
        let disk = LocalDisk;

        assert!(disk.folder_empty(dir.path()).await.unwrap());

        fs::write(dir.path().join("track.mp3"), b"xx").unwrap();
        assert!(!disk.folder_empty(dir.path()).await.unwrap());
    }

    #[tokio::test]
    async fn test_local_disk_list_files_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("album")).unwrap();
        fs::write(dir.path().join("a.mp3"), b"a").unwrap();
        fs::write(dir.path().join("album").join("b.flac"), b"b").unwrap();

        let disk = LocalDisk;
        let all = disk.list_files(dir.path(), true).await.unwrap();
        assert_eq!(all.len(), 2);

        let top = disk.list_files(dir.path(), false).await.unwrap();
        assert_eq!(top.len(), 1);
        assert!(top[0].ends_with("a.mp3"));
    }

    #[tokio::test]
    async fn test_local_disk_file_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        fs::write(&path, b"abcde").unwrap();

        let disk = LocalDisk;
        let info = disk.file_info(&path).await.unwrap();
        assert_eq!(info.size, 5);
        assert!(!info.is_directory);
    }

    #[tokio::test]
    async fn test_unavailable_managed_library() {
        let provider = UnavailableManagedLibrary;
        let settings = ManagedLibrarySettings {
            endpoint: "http://localhost:8080".to_string(),
            api_key: None,
            library_name: None,
        };

        let err = provider.all_file_paths(&settings).await.unwrap_err();
        assert!(matches!(err, BridgeError::NotAvailable(_)));
    }
}
