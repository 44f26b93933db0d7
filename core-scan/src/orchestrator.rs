//! Scan orchestration.
//!
//! Drives the full pipeline for a set of folders: enumerate, filter,
//! clean stale catalog entries, run decisions once over everything
//! gathered, then persist inserts and updates. Progress and skips are
//! reported over the event bus.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use bridge_traits::{Clock, DiskProvider};
use core_catalog::{ArtistId, ArtistStore, CatalogStore, RootFolderDirectory};
use core_runtime::events::{CoreEvent, EventBus, ScanEvent, ScanSkippedReason};

use crate::config::ScanConfig;
use crate::decision::{DecisionConfig, DecisionMaker, FilterMode, ScanCandidate};
use crate::error::{Result, ScanError};
use crate::path_filter::PathFilter;
use crate::reconciler::reconcile;
use crate::walker::StorageWalker;

/// Parameters for one scan run.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Folders to scan. When absent, every configured root is scanned.
    pub folders: Option<Vec<String>>,
    /// Which candidates the decision maker should consider.
    pub filter: FilterMode,
    /// Whether decisions may propose artists the catalog does not know.
    pub add_new_artists: bool,
    /// Artists this run is on behalf of; they receive skip and
    /// completion events.
    pub artist_ids: Vec<ArtistId>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            folders: None,
            filter: FilterMode::Known,
            add_new_artists: false,
            artist_ids: Vec::new(),
        }
    }
}

/// Coordinates walking, decisions and catalog reconciliation.
pub struct ScanOrchestrator {
    config: ScanConfig,
    walker: StorageWalker,
    disk: Arc<dyn DiskProvider>,
    roots: RootFolderDirectory,
    decision_maker: Arc<dyn DecisionMaker>,
    catalog: Arc<dyn CatalogStore>,
    artists: Arc<dyn ArtistStore>,
    clock: Arc<dyn Clock>,
    events: EventBus,
}

impl ScanOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: ScanConfig,
        walker: StorageWalker,
        disk: Arc<dyn DiskProvider>,
        roots: RootFolderDirectory,
        decision_maker: Arc<dyn DecisionMaker>,
        catalog: Arc<dyn CatalogStore>,
        artists: Arc<dyn ArtistStore>,
        clock: Arc<dyn Clock>,
        events: EventBus,
    ) -> Self {
        Self {
            config,
            walker,
            disk,
            roots,
            decision_maker,
            catalog,
            artists,
            clock,
            events,
        }
    }

    /// Run a scan over the requested folders.
    ///
    /// A vanished folder whose root is also missing (or empty) aborts the
    /// whole run: every artist in the options gets a skip event and the
    /// catalog is left untouched, guarding against mass deletion when a
    /// mount dropped out. A vanished subfolder inside a healthy root is
    /// genuine: its catalog entries are removed and the run continues.
    #[instrument(skip(self, cancel), fields(folders = ?options.folders))]
    pub async fn scan(&self, options: ScanOptions, cancel: CancellationToken) -> Result<()> {
        let folders = match &options.folders {
            Some(folders) => folders.clone(),
            None => self.roots.all().iter().map(|r| r.path.clone()).collect(),
        };

        let mut gathered: Vec<ScanCandidate> = Vec::new();

        for folder in &folders {
            if cancel.is_cancelled() {
                return Err(ScanError::Cancelled);
            }

            let root = self.roots.resolve_best_match(folder).ok_or_else(|| {
                ScanError::UnmanagedLocation {
                    path: folder.clone(),
                }
            })?;
            let root_path = root.path.clone();

            if !self.disk.folder_exists(Path::new(folder)).await? {
                if !self.disk.folder_exists(Path::new(&root_path)).await? {
                    warn!("Root folder ({}) doesn't exist", root_path);
                    self.emit_skipped(&options.artist_ids, ScanSkippedReason::RootFolderMissing)
                        .await?;
                    return Ok(());
                }

                if self.disk.folder_empty(Path::new(&root_path)).await? {
                    warn!("Root folder ({}) is empty", root_path);
                    self.emit_skipped(&options.artist_ids, ScanSkippedReason::RootFolderEmpty)
                        .await?;
                    return Ok(());
                }

                debug!("Scan folder ({}) doesn't exist, cleaning its entries", folder);
                self.clean(folder, &[]).await?;
                continue;
            }

            info!("Scanning {}", folder);
            let candidates = self.walker.list_candidates(folder, true).await?;
            let candidates = PathFilter.filter_candidates(folder, candidates);

            let _ = self.events.emit(CoreEvent::Scan(ScanEvent::FolderScanned {
                folder: folder.clone(),
                candidates: candidates.len(),
            }));

            if candidates.is_empty() {
                warn!("Scan folder {} is empty", folder);
                continue;
            }

            let keep: Vec<String> = candidates.iter().map(|c| c.path.clone()).collect();
            self.clean(folder, &keep).await?;
            gathered.extend(candidates);
        }

        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }

        let decisions = self
            .decision_maker
            .decide(
                gathered,
                DecisionConfig {
                    filter: options.filter,
                    include_existing: true,
                    add_new_artists: options.add_new_artists,
                },
            )
            .await?;

        let mut known = Vec::new();
        for folder in &folders {
            known.extend(self.catalog.get_by_location(folder).await?);
        }

        let outcome = reconcile(
            &decisions,
            &known,
            self.clock.now(),
            self.config.modified_tolerance,
        );

        if !outcome.inserts.is_empty() {
            info!("Adding {} new files to the catalog", outcome.inserts.len());
            self.catalog.add_many(outcome.inserts).await?;
        }
        if !outcome.updates.is_empty() {
            debug!("Updating {} changed files", outcome.updates.len());
            self.catalog.update_many(outcome.updates).await?;
        }

        for artist in self.artists.get_artists(&options.artist_ids).await? {
            let _ = self.events.emit(CoreEvent::Scan(ScanEvent::ArtistScanned {
                artist_id: artist.id.0,
            }));
        }

        Ok(())
    }

    async fn clean(&self, folder: &str, keep: &[String]) -> Result<()> {
        let removed = self.catalog.remove_by_location(folder, keep).await?;
        if removed > 0 {
            info!("Removed {} stale catalog entries under {}", removed, folder);
        }
        Ok(())
    }

    async fn emit_skipped(&self, artist_ids: &[ArtistId], reason: ScanSkippedReason) -> Result<()> {
        for artist in self.artists.get_artists(artist_ids).await? {
            let _ = self
                .events
                .emit(CoreEvent::Scan(ScanEvent::ArtistScanSkipped {
                    artist_id: artist.id.0,
                    reason,
                }));
        }
        Ok(())
    }
}
