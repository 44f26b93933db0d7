//! Storage scanning pipeline.
//!
//! Walks configured root folders, filters out system and extras noise,
//! runs candidates through a decision maker and reconciles the survivors
//! against the catalog. The orchestrator in [`orchestrator`] ties the
//! stages together; everything in between is individually testable.

pub mod config;
pub mod decision;
pub mod error;
pub mod orchestrator;
pub mod path_filter;
pub mod reconciler;
pub mod walker;

pub use config::ScanConfig;
pub use decision::{Decision, DecisionConfig, DecisionItem, DecisionMaker, FilterMode, ScanCandidate};
pub use error::{Result, ScanError};
pub use orchestrator::{ScanOptions, ScanOrchestrator};
pub use path_filter::PathFilter;
pub use reconciler::{reconcile, stale_entries, ReconcileOutcome};
pub use walker::StorageWalker;
