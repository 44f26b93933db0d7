//! Catalog store contracts.
//!
//! The engine never owns persistence. These traits are the seam to whatever
//! database the host runs; the in-memory implementations back tests and
//! small embedded deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{Artist, ArtistId, TrackFile, TrackFileId};
use crate::paths::{is_parent_or_self, normalize_path};

/// Persistence contract for catalogued track files.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All files whose path lies under `path` (inclusive).
    async fn get_by_location(&self, path: &str) -> Result<Vec<TrackFile>>;

    /// Insert new files. Ids are assigned by the store; the returned files
    /// carry them.
    async fn add_many(&self, files: Vec<TrackFile>) -> Result<Vec<TrackFile>>;

    /// Update existing files in place, matched by id.
    async fn update_many(&self, files: Vec<TrackFile>) -> Result<()>;

    /// Remove every file under `path` whose path is not in `keep_paths`
    /// (normalization-aware). Returns the number of removed entries.
    async fn remove_by_location(&self, path: &str, keep_paths: &[String]) -> Result<usize>;
}

/// Directory of catalog subjects.
#[async_trait]
pub trait ArtistStore: Send + Sync {
    /// Artists with the given ids; unknown ids are silently dropped.
    async fn get_artists(&self, ids: &[ArtistId]) -> Result<Vec<Artist>>;

    /// Every artist in the catalog.
    async fn all(&self) -> Result<Vec<Artist>>;
}

// =============================================================================
// In-memory implementations
// =============================================================================

/// In-memory [`CatalogStore`] for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    files: RwLock<HashMap<TrackFileId, TrackFile>>,
    next_id: AtomicI64,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seed the store with pre-assigned files, advancing the id counter past
    /// the highest seeded id.
    pub async fn seed(&self, files: Vec<TrackFile>) {
        let mut map = self.files.write().await;
        for file in files {
            self.next_id
                .fetch_max(file.id.0 + 1, Ordering::SeqCst);
            map.insert(file.id, file);
        }
    }

    /// Number of files currently stored.
    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    /// Whether the store holds no files.
    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn get_by_location(&self, path: &str) -> Result<Vec<TrackFile>> {
        let files = self.files.read().await;
        let mut matched: Vec<TrackFile> = files
            .values()
            .filter(|file| is_parent_or_self(path, &file.path))
            .cloned()
            .collect();
        matched.sort_by_key(|file| file.id);
        Ok(matched)
    }

    async fn add_many(&self, files: Vec<TrackFile>) -> Result<Vec<TrackFile>> {
        let mut map = self.files.write().await;
        let mut added = Vec::with_capacity(files.len());
        for mut file in files {
            file.id = TrackFileId(self.next_id.fetch_add(1, Ordering::SeqCst));
            map.insert(file.id, file.clone());
            added.push(file);
        }
        Ok(added)
    }

    async fn update_many(&self, files: Vec<TrackFile>) -> Result<()> {
        let mut map = self.files.write().await;
        for file in files {
            map.insert(file.id, file);
        }
        Ok(())
    }

    async fn remove_by_location(&self, path: &str, keep_paths: &[String]) -> Result<usize> {
        let keep: std::collections::HashSet<String> =
            keep_paths.iter().map(|p| normalize_path(p)).collect();

        let mut map = self.files.write().await;
        let stale: Vec<TrackFileId> = map
            .values()
            .filter(|file| {
                is_parent_or_self(path, &file.path) && !keep.contains(&normalize_path(&file.path))
            })
            .map(|file| file.id)
            .collect();

        for id in &stale {
            map.remove(id);
        }
        Ok(stale.len())
    }
}

/// In-memory [`ArtistStore`] for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryArtistStore {
    artists: RwLock<Vec<Artist>>,
}

impl MemoryArtistStore {
    pub fn new(artists: Vec<Artist>) -> Self {
        Self {
            artists: RwLock::new(artists),
        }
    }
}

#[async_trait]
impl ArtistStore for MemoryArtistStore {
    async fn get_artists(&self, ids: &[ArtistId]) -> Result<Vec<Artist>> {
        let artists = self.artists.read().await;
        Ok(artists
            .iter()
            .filter(|artist| ids.contains(&artist.id))
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<Artist>> {
        Ok(self.artists.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Quality};
    use chrono::Utc;

    fn file(path: &str) -> TrackFile {
        TrackFile {
            id: TrackFileId(0),
            path: path.to_string(),
            size: 100,
            modified: Utc::now(),
            date_added: Utc::now(),
            quality: Quality::unknown(),
            language: Language::unknown(),
            media_info: None,
            part: 1,
            part_count: 1,
        }
    }

    #[tokio::test]
    async fn test_add_many_assigns_ids() {
        let store = MemoryCatalogStore::new();
        let added = store
            .add_many(vec![file("/music/a/1.mp3"), file("/music/a/2.mp3")])
            .await
            .unwrap();

        assert_eq!(added.len(), 2);
        assert!(added.iter().all(|f| f.id.0 > 0));
        assert_ne!(added[0].id, added[1].id);
    }

    #[tokio::test]
    async fn test_get_by_location_filters_to_subtree() {
        let store = MemoryCatalogStore::new();
        store
            .add_many(vec![file("/music/a/1.mp3"), file("/music/b/2.mp3")])
            .await
            .unwrap();

        let under_a = store.get_by_location("/music/a").await.unwrap();
        assert_eq!(under_a.len(), 1);
        assert_eq!(under_a[0].path, "/music/a/1.mp3");

        let all = store.get_by_location("/music").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_by_location_honors_keep_paths() {
        let store = MemoryCatalogStore::new();
        store
            .add_many(vec![
                file("/music/a/1.mp3"),
                file("/music/a/2.mp3"),
                file("/music/b/3.mp3"),
            ])
            .await
            .unwrap();

        // Keep path differs in case from the stored one; must still match.
        let removed = store
            .remove_by_location("/music/a", &["/Music/A/1.MP3".to_string()])
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 2);
        let remaining = store.get_by_location("/music/a").await.unwrap();
        assert_eq!(remaining[0].path, "/music/a/1.mp3");
    }

    #[tokio::test]
    async fn test_artist_store_lookup() {
        let artists = vec![
            Artist {
                id: ArtistId(1),
                name: "Artist One".to_string(),
                path: "/music/artist one".to_string(),
            },
            Artist {
                id: ArtistId(2),
                name: "Artist Two".to_string(),
                path: "/music/artist two".to_string(),
            },
        ];
        let store = MemoryArtistStore::new(artists);

        let found = store.get_artists(&[ArtistId(2), ArtistId(9)]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Artist Two");
        assert_eq!(store.all().await.unwrap().len(), 2);
    }
}
