//! Storage walker.
//!
//! Enumerates candidate media files under a folder. Enumeration is direct
//! for local roots and delegated to the managing server for externally
//! managed ones; either way the result is narrowed to the media extension
//! allow-list and carries size and modification time for reconciliation.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use bridge_traits::{DiskProvider, ManagedLibraryProvider};
use core_catalog::paths::is_parent_or_self;
use core_catalog::{RootFolderDirectory, RootFolderKind};

use crate::config::ScanConfig;
use crate::decision::ScanCandidate;
use crate::error::{Result, ScanError};

/// Enumerates candidate files under configured root folders.
pub struct StorageWalker {
    config: ScanConfig,
    disk: Arc<dyn DiskProvider>,
    managed_library: Option<Arc<dyn ManagedLibraryProvider>>,
    roots: RootFolderDirectory,
}

impl StorageWalker {
    pub fn new(
        config: ScanConfig,
        disk: Arc<dyn DiskProvider>,
        managed_library: Option<Arc<dyn ManagedLibraryProvider>>,
        roots: RootFolderDirectory,
    ) -> Self {
        Self {
            config,
            disk,
            managed_library,
            roots,
        }
    }

    /// List candidate media files under `path`.
    ///
    /// Fails with [`ScanError::UnmanagedLocation`] when `path` lies outside
    /// every configured root. Per-file stat failures are logged and the
    /// file excluded; they never fail the walk.
    #[instrument(skip(self))]
    pub async fn list_candidates(&self, path: &str, recursive: bool) -> Result<Vec<ScanCandidate>> {
        let root = self
            .roots
            .resolve_best_match(path)
            .ok_or_else(|| ScanError::UnmanagedLocation {
                path: path.to_string(),
            })?;

        let paths = match &root.kind {
            RootFolderKind::ExternallyManaged(settings) => {
                info!("Getting file list from managing server for {}", path);
                let provider = self.managed_library.as_ref().ok_or_else(|| {
                    ScanError::CapabilityMissing {
                        capability: "ManagedLibraryProvider".to_string(),
                    }
                })?;

                provider
                    .all_file_paths(settings)
                    .await?
                    .into_iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .filter(|p| is_parent_or_self(path, p))
                    .collect::<Vec<_>>()
            }
            RootFolderKind::LocalDirectory => {
                debug!("Scanning '{}' for media files", path);
                self.disk
                    .list_files(Path::new(path), recursive)
                    .await?
                    .into_iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect()
            }
        };

        let mut candidates = Vec::new();
        for file_path in paths {
            if !self.config.is_media_extension(&file_path) {
                continue;
            }

            match self.disk.file_info(Path::new(&file_path)).await {
                Ok(info) if !info.is_directory => candidates.push(ScanCandidate {
                    path: file_path,
                    size: info.size,
                    modified: info.modified,
                }),
                Ok(_) => {}
                Err(e) => {
                    warn!("Unable to stat {}: {}", file_path, e);
                }
            }
        }

        debug!("{} media files were found in {}", candidates.len(), path);
        Ok(candidates)
    }

    /// List files under `path` that are *not* recognized media.
    ///
    /// Used by cleanup tooling to report leftovers (artwork dumps, cue
    /// sheets) without ever feeding them into decision making.
    #[instrument(skip(self))]
    pub async fn list_other_files(&self, path: &str, recursive: bool) -> Result<Vec<String>> {
        let files = self.disk.list_files(Path::new(path), recursive).await?;

        let others: Vec<String> = files
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|p| !self.config.is_media_extension(p))
            .collect();

        debug!("{} non-media files were found in {}", others.len(), path);
        Ok(others)
    }
}
