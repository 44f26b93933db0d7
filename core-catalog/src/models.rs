//! Domain models for the media library catalog.

use bridge_traits::storage::ManagedLibrarySettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a catalogued track file.
///
/// Ids are assigned by the catalog store; `0` marks a file that has not been
/// persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackFileId(pub i64);

impl fmt::Display for TrackFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtistId(pub i64);

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Quality & Language
// =============================================================================

/// A quality rank assigned to a file (e.g. "MP3-320", "FLAC").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quality {
    pub id: i32,
    pub name: String,
}

impl Quality {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Quality for files whose encoding could not be determined.
    pub fn unknown() -> Self {
        Self::new(0, "Unknown")
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A language marker assigned to a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

impl Language {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(0, "Unknown")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// Catalog Entities
// =============================================================================

/// A catalogued media file.
///
/// Owned exclusively by the catalog store; the scan pipeline proposes
/// inserts, updates, and deletions but never mutates persisted state
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFile {
    pub id: TrackFileId,
    /// Absolute path as observed on storage; unique within a root folder.
    pub path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub date_added: DateTime<Utc>,
    pub quality: Quality,
    pub language: Language,
    /// Free-form probe output (codec, bitrate, channels); opaque to the
    /// engine.
    pub media_info: Option<serde_json::Value>,
    /// Part number within a multi-part work, 1-based.
    pub part: u32,
    pub part_count: u32,
}

impl TrackFile {
    /// A fresh, unpersisted entry. The store assigns the id on insert.
    pub fn new(path: impl Into<String>, size: u64, modified: DateTime<Utc>) -> Self {
        Self {
            id: TrackFileId(0),
            path: path.into(),
            size,
            modified,
            date_added: modified,
            quality: Quality::unknown(),
            language: Language::unknown(),
            media_info: None,
            part: 1,
            part_count: 1,
        }
    }
}

/// A catalog subject: the artist a set of files belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    /// The artist's folder underneath a configured root.
    pub path: String,
}

/// How a root folder's contents are enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootFolderKind {
    /// Direct filesystem listing.
    LocalDirectory,
    /// Enumeration delegated to an external library server.
    ExternallyManaged(ManagedLibrarySettings),
}

/// A configured top-level directory the engine is allowed to scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootFolder {
    pub path: String,
    pub kind: RootFolderKind,
}

impl RootFolder {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: RootFolderKind::LocalDirectory,
        }
    }

    pub fn externally_managed(
        path: impl Into<String>,
        settings: ManagedLibrarySettings,
    ) -> Self {
        Self {
            path: path.into(),
            kind: RootFolderKind::ExternallyManaged(settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_display() {
        let q = Quality::new(3, "FLAC");
        assert_eq!(q.to_string(), "FLAC");
        assert_eq!(Quality::unknown().id, 0);
    }

    #[test]
    fn test_root_folder_constructors() {
        let local = RootFolder::local("/music");
        assert_eq!(local.kind, RootFolderKind::LocalDirectory);

        let settings = ManagedLibrarySettings {
            endpoint: "http://nas:8080".to_string(),
            api_key: Some("k".to_string()),
            library_name: None,
        };
        let managed = RootFolder::externally_managed("/library", settings.clone());
        assert_eq!(managed.kind, RootFolderKind::ExternallyManaged(settings));
    }

    #[test]
    fn test_track_file_serialization_round_trip() {
        let file = TrackFile {
            id: TrackFileId(1),
            path: "/music/a/track.mp3".to_string(),
            size: 1024,
            modified: Utc::now(),
            date_added: Utc::now(),
            quality: Quality::new(2, "MP3-320"),
            language: Language::new(1, "English"),
            media_info: Some(serde_json::json!({"bitrate": 320})),
            part: 1,
            part_count: 1,
        };

        let json = serde_json::to_string(&file).unwrap();
        let back: TrackFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, file);
    }
}
