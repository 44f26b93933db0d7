//! # Catalog Module
//!
//! Owns the domain model of the media catalog and the contracts the engine
//! uses to read and propose changes to it.
//!
//! ## Overview
//!
//! This module provides:
//! - Catalog entities: track files, artists, root folders
//! - The [`CatalogStore`]/[`ArtistStore`] persistence seams with in-memory
//!   implementations for testing
//! - Longest-prefix root folder resolution
//! - Cutoff evaluation over acceptance profiles for upgrade eligibility
//! - Normalization-aware path comparison shared by the scan pipeline

pub mod cutoff;
pub mod error;
pub mod models;
pub mod paths;
pub mod roots;
pub mod store;

pub use cutoff::{
    below_cutoff, language_below_cutoff, language_profiles_below_cutoff, profiles_below_cutoff,
    AcceptanceProfile, LanguageProfile, LanguagesBelowCutoff, ProfileItem, QualitiesBelowCutoff,
};
pub use error::{CatalogError, Result};
pub use models::{
    Artist, ArtistId, Language, Quality, RootFolder, RootFolderKind, TrackFile, TrackFileId,
};
pub use roots::RootFolderDirectory;
pub use store::{ArtistStore, CatalogStore, MemoryArtistStore, MemoryCatalogStore};
