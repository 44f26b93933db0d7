//! Umbrella crate for the library synchronization engine.
//!
//! Host applications can depend on `mlc-workspace` and reach every
//! engine crate through one dependency instead of wiring each path
//! individually. The individual crates stay independently usable.
//!
//! - [`bridge_traits`] - capabilities the host provides (disk, time,
//!   managed library access)
//! - [`core_runtime`] - configuration, events, logging
//! - [`core_catalog`] - catalog entities, path semantics, cutoff queries
//! - [`core_scan`] - the scan pipeline
//! - [`core_lists`] - import list aggregation

pub use bridge_traits;
pub use core_catalog;
pub use core_lists;
pub use core_runtime;
pub use core_scan;
