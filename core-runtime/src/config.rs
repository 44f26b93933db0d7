//! # Core Configuration Module
//!
//! Builder for the capability bundle the engine needs at startup. Validation
//! is fail-fast: a missing required bridge produces an actionable error at
//! build time rather than a panic deep inside a scan.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .build()
//!     .expect("desktop defaults satisfy every required capability");
//! ```
//!
//! Hosts that manage a library through an external server also inject a
//! [`ManagedLibraryProvider`]:
//!
//! ```ignore
//! let config = CoreConfig::builder()
//!     .disk(Arc::new(MyNetworkDisk))
//!     .managed_library(Arc::new(MyLibraryServerClient))
//!     .event_buffer_size(500)
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{Clock, DiskProvider, LocalDisk, ManagedLibraryProvider, SystemClock};
use std::sync::Arc;

use crate::events::DEFAULT_EVENT_BUFFER_SIZE;

/// Capability bundle for the library synchronization engine.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Disk access bridge (desktop default: [`LocalDisk`])
    pub disk: Arc<dyn DiskProvider>,

    /// Enumeration provider for externally managed roots (optional)
    pub managed_library: Option<Arc<dyn ManagedLibraryProvider>>,

    /// Time source (default: [`SystemClock`])
    pub clock: Arc<dyn Clock>,

    /// Buffer size for the event bus channel
    pub event_buffer_size: usize,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("disk", &"DiskProvider { ... }")
            .field(
                "managed_library",
                &self
                    .managed_library
                    .as_ref()
                    .map(|_| "ManagedLibraryProvider { ... }"),
            )
            .field("clock", &"Clock { ... }")
            .field("event_buffer_size", &self.event_buffer_size)
            .finish()
    }
}

impl CoreConfig {
    /// Start building a configuration.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validate the assembled configuration.
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "event_buffer_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`CoreConfig`].
#[derive(Default)]
pub struct CoreConfigBuilder {
    disk: Option<Arc<dyn DiskProvider>>,
    managed_library: Option<Arc<dyn ManagedLibraryProvider>>,
    clock: Option<Arc<dyn Clock>>,
    event_buffer_size: Option<usize>,
}

impl CoreConfigBuilder {
    /// Inject a disk access bridge.
    ///
    /// Defaults to [`LocalDisk`] when not provided.
    pub fn disk(mut self, disk: Arc<dyn DiskProvider>) -> Self {
        self.disk = Some(disk);
        self
    }

    /// Inject an enumeration provider for externally managed roots.
    ///
    /// Without one, scans of `ExternallyManaged` root folders fail with a
    /// capability-missing error.
    pub fn managed_library(mut self, provider: Arc<dyn ManagedLibraryProvider>) -> Self {
        self.managed_library = Some(provider);
        self
    }

    /// Inject a time source.
    ///
    /// Defaults to [`SystemClock`]. Tests inject
    /// [`ManualClock`](bridge_traits::ManualClock) instead.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the event bus buffer size.
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Assemble and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a setting is invalid.
    pub fn build(self) -> Result<CoreConfig> {
        let config = CoreConfig {
            disk: self.disk.unwrap_or_else(|| Arc::new(LocalDisk)),
            managed_library: self.managed_library,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::ManualClock;
    use chrono::Utc;

    #[test]
    fn test_builder_defaults() {
        let config = CoreConfig::builder().build().unwrap();
        assert!(config.managed_library.is_none());
        assert_eq!(config.event_buffer_size, DEFAULT_EVENT_BUFFER_SIZE);
    }

    #[test]
    fn test_builder_rejects_zero_buffer() {
        let result = CoreConfig::builder().event_buffer_size(0).build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_accepts_injected_clock() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let config = CoreConfig::builder().clock(clock.clone()).build().unwrap();
        assert_eq!(config.clock.now(), clock.now());
    }
}
