//! # Host Bridge Traits
//!
//! Capability traits the library synchronization engine depends on but does
//! not own. Each trait represents something a host must provide: disk
//! enumeration, externally managed library access, or a time source.
//!
//! ## Traits
//!
//! - [`DiskProvider`](storage::DiskProvider) - Read-only filesystem enumeration
//! - [`ManagedLibraryProvider`](storage::ManagedLibraryProvider) - Delegated
//!   enumeration for roots owned by an external library server
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! Desktop-ready defaults ship alongside the traits ([`LocalDisk`],
//! [`SystemClock`]); tests inject fixtures instead.
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Host
//! implementations should convert platform-specific errors into it and keep
//! the message actionable (include paths, endpoints, status).
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so they can be shared across
//! async tasks behind `Arc`.

pub mod error;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use storage::{
    DiskProvider, FileMeta, LocalDisk, ManagedLibraryProvider, ManagedLibrarySettings,
    UnavailableManagedLibrary,
};
pub use time::{Clock, ManualClock, SystemClock};
