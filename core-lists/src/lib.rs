//! Import list aggregation.
//!
//! External sources propose artist and album entries for the library.
//! The [`aggregator::ListAggregator`] fetches every enabled source
//! concurrently, honors per-source refresh intervals, and merges the
//! results into one deduplicated list.

pub mod aggregator;
pub mod error;
pub mod source;
pub mod status;

pub use aggregator::{AggregatorConfig, ListAggregator};
pub use error::{ListError, Result};
pub use source::{ImportList, ImportListDefinition, ImportListItem};
pub use status::{ListStatusStore, MemoryListStatusStore};
