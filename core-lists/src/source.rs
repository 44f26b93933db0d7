//! Import list source contract.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Static description of one configured import list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportListDefinition {
    pub id: i64,
    pub name: String,
    /// Disabled sources are skipped entirely, with no event.
    pub enabled: bool,
    /// Minimum time between two fetches of this source.
    pub min_refresh_interval: Duration,
}

impl ImportListDefinition {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            enabled: true,
            min_refresh_interval: Duration::hours(6),
        }
    }

    /// Whether the source is due given when it last synced.
    pub fn is_due(&self, last_sync: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_sync {
            Some(last) => now >= last + self.min_refresh_interval,
            None => true,
        }
    }
}

/// One entry a source proposes for the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportListItem {
    pub artist: String,
    pub album: String,
    /// Release date when the source knows it.
    pub release_date: Option<DateTime<Utc>>,
    /// Source-side identifier, when the source has a stable one.
    pub foreign_id: Option<String>,
}

impl ImportListItem {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            release_date: None,
            foreign_id: None,
        }
    }

    /// Dedup key over the artist and album names.
    ///
    /// Case and surrounding whitespace differ wildly between sources for
    /// what is the same record, so both are normalized away.
    pub fn natural_key(&self) -> (String, String) {
        (
            self.artist.trim().to_lowercase(),
            self.album.trim().to_lowercase(),
        )
    }
}

/// A fetchable import list source.
#[async_trait]
pub trait ImportList: Send + Sync {
    /// The source's static configuration.
    fn definition(&self) -> &ImportListDefinition;

    /// Fetch the source's current items.
    async fn fetch(&self) -> Result<Vec<ImportListItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_key_normalizes_case_and_whitespace() {
        let a = ImportListItem::new("The Band", "First Album");
        let b = ImportListItem::new("  the band ", "FIRST ALBUM");
        assert_eq!(a.natural_key(), b.natural_key());
    }

    #[test]
    fn test_natural_key_distinguishes_albums() {
        let a = ImportListItem::new("The Band", "First Album");
        let b = ImportListItem::new("The Band", "Second Album");
        assert_ne!(a.natural_key(), b.natural_key());
    }

    #[test]
    fn test_never_synced_source_is_due() {
        let def = ImportListDefinition::new(1, "list");
        assert!(def.is_due(None, Utc::now()));
    }

    #[test]
    fn test_recently_synced_source_is_not_due() {
        let def = ImportListDefinition::new(1, "list");
        let now = Utc::now();
        assert!(!def.is_due(Some(now - Duration::hours(1)), now));
        assert!(def.is_due(Some(now - Duration::hours(7)), now));
    }
}
