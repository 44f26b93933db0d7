//! Import decision contract.
//!
//! Scoring a candidate file (matching it to an artist, assigning quality
//! and media info) is an external collaborator's job. The scan pipeline
//! hands over every filtered candidate in one call and consumes the
//! verdicts during reconciliation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use core_catalog::{Language, Quality};

/// Which candidate files the decision maker should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Skip files already present in the catalog with unchanged attributes.
    #[default]
    Known,
    /// Skip files already matched to an artist.
    Matched,
    /// Consider every candidate.
    All,
}

/// Options handed to the decision maker alongside the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionConfig {
    pub filter: FilterMode,
    /// Include files already catalogued so their attributes can be
    /// refreshed.
    pub include_existing: bool,
    /// Permit matching candidates to artists not yet in the catalog.
    pub add_new_artists: bool,
}

/// One file observed during a scan, before any decision was made.
///
/// Ephemeral: lives for the duration of one orchestration call and is never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanCandidate {
    pub path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// A candidate enriched by the decision maker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionItem {
    pub path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub quality: Quality,
    pub language: Language,
    pub media_info: Option<serde_json::Value>,
    pub part: u32,
    pub part_count: u32,
}

impl DecisionItem {
    /// Enrichment baseline: the candidate's observed attributes with
    /// unknown quality/language.
    pub fn from_candidate(candidate: &ScanCandidate) -> Self {
        Self {
            path: candidate.path.clone(),
            size: candidate.size,
            modified: candidate.modified,
            quality: Quality::unknown(),
            language: Language::unknown(),
            media_info: None,
            part: 1,
            part_count: 1,
        }
    }
}

/// The decision maker's verdict for one candidate.
///
/// A rejected item still carries assigned attributes; rejection controls
/// import approval, not whether the file's on-disk state is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub item: DecisionItem,
    /// Empty when the candidate was approved.
    pub rejections: Vec<String>,
}

impl Decision {
    pub fn approved(item: DecisionItem) -> Self {
        Self {
            item,
            rejections: Vec::new(),
        }
    }

    pub fn rejected(item: DecisionItem, reason: impl Into<String>) -> Self {
        Self {
            item,
            rejections: vec![reason.into()],
        }
    }

    pub fn is_approved(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// External decision-maker contract.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DecisionMaker: Send + Sync {
    /// Score and enrich the merged candidate set from one scan.
    ///
    /// A candidate that fails extraction should be excluded from the result
    /// rather than failing the call.
    async fn decide(
        &self,
        candidates: Vec<ScanCandidate>,
        config: DecisionConfig,
    ) -> Result<Vec<Decision>>;
}
