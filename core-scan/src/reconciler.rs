//! Catalog reconciliation.
//!
//! Pure diffing between approved decisions and the catalog's view of a
//! folder. The orchestrator persists the outcome; nothing here touches
//! storage.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use core_catalog::paths::normalize_path;
use core_catalog::TrackFile;
use tracing::debug;

use crate::decision::Decision;

/// Result of diffing approved decisions against known catalog entries.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    /// Files on storage the catalog has never seen.
    pub inserts: Vec<TrackFile>,
    /// Known files whose size or modification time drifted.
    pub updates: Vec<TrackFile>,
}

impl ReconcileOutcome {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty()
    }
}

/// Known entries whose paths no longer appear among `observed`.
///
/// Path comparison is normalized, so a case-only rename does not count
/// as a removal.
pub fn stale_entries<'a>(known: &'a [TrackFile], observed: &[String]) -> Vec<&'a TrackFile> {
    let observed: Vec<String> = observed.iter().map(|p| normalize_path(p)).collect();
    known
        .iter()
        .filter(|file| !observed.contains(&normalize_path(&file.path)))
        .collect()
}

/// Diff `decisions` against `known` catalog entries.
///
/// Every decision participates, rejected ones included: the catalog
/// tracks what is on storage, and a rejection only means the importer
/// had nothing to do with the file. A decision with no known counterpart
/// becomes an insert stamped with `now` as its added date. A known
/// counterpart becomes an update when the size differs or the
/// modification time drifted by more than `tolerance`; the update
/// carries the observed size, time, quality and media info while
/// preserving identity and the original added date.
pub fn reconcile(
    decisions: &[Decision],
    known: &[TrackFile],
    now: DateTime<Utc>,
    tolerance: Duration,
) -> ReconcileOutcome {
    let known_by_path: HashMap<String, &TrackFile> = known
        .iter()
        .map(|file| (normalize_path(&file.path), file))
        .collect();

    let mut outcome = ReconcileOutcome::default();

    for decision in decisions {
        let item = &decision.item;

        match known_by_path.get(&normalize_path(&item.path)) {
            None => {
                let mut file = TrackFile::new(&item.path, item.size, item.modified);
                file.date_added = now;
                file.quality = item.quality.clone();
                file.language = item.language.clone();
                file.media_info = item.media_info.clone();
                file.part = item.part;
                file.part_count = item.part_count;
                outcome.inserts.push(file);
            }
            Some(existing) => {
                let drift = (item.modified - existing.modified).abs();
                if existing.size != item.size || drift > tolerance {
                    let mut updated = (*existing).clone();
                    updated.size = item.size;
                    updated.modified = item.modified;
                    updated.quality = item.quality.clone();
                    updated.media_info = item.media_info.clone();
                    outcome.updates.push(updated);
                }
            }
        }
    }

    debug!(
        inserts = outcome.inserts.len(),
        updates = outcome.updates.len(),
        "reconciled folder against catalog"
    );
    outcome
}
