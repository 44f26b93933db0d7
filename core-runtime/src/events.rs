//! # Event Bus System
//!
//! Provides an event-driven architecture for the Media Library Core using
//! `tokio::sync::broadcast`. Scan and list modules publish typed lifecycle
//! events; subscribers (schedulers, notification frontends) consume them
//! without coupling to the producing module.
//!
//! ## Usage
//!
//! ### Publishing Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, ScanEvent};
//!
//! let event_bus = EventBus::new(100);
//! let event = CoreEvent::Scan(ScanEvent::ArtistScanned { artist_id: 42 });
//!
//! // Fire and forget: delivery failures (no subscribers) are not errors
//! // for the producer.
//! event_bus.emit(event).ok();
//! ```
//!
//! ### Subscribing to Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent};
//! use tokio::sync::broadcast::error::RecvError;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! tokio::spawn(async move {
//!     loop {
//!         match stream.recv().await {
//!             Ok(event) => println!("Received: {:?}", event),
//!             Err(RecvError::Lagged(n)) => eprintln!("Missed {} events", n),
//!             Err(RecvError::Closed) => break,
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Error Handling
//!
//! `RecvError::Lagged(n)` means the subscriber fell behind by `n` events and
//! is non-fatal; `RecvError::Closed` signals shutdown. Producers treat a
//! send error (no subscribers) as a no-op via `.ok()`.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Subscribers that fall behind by more than this receive `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Disk scan lifecycle events
    Scan(ScanEvent),
    /// Import list fetch events
    List(ListEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Scan(e) => e.description(),
            CoreEvent::List(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Scan(ScanEvent::ArtistScanSkipped { .. }) => EventSeverity::Warning,
            CoreEvent::List(ListEvent::FetchFailed { .. }) => EventSeverity::Warning,
            CoreEvent::Scan(ScanEvent::ArtistScanned { .. }) => EventSeverity::Info,
            CoreEvent::List(ListEvent::FetchCompleted { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

// ============================================================================
// Scan Events
// ============================================================================

/// Reason an artist's scan was skipped before any reconciliation ran.
///
/// Both variants describe storage-outage conditions on the artist's root
/// folder; neither is ever interpreted as a deletion signal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScanSkippedReason {
    /// The configured root folder does not exist on storage.
    RootFolderMissing,
    /// The configured root folder exists but contains nothing at all.
    RootFolderEmpty,
}

/// Events emitted by the scan orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ScanEvent {
    /// An artist's scan was aborted before reconciliation.
    ArtistScanSkipped {
        /// The artist whose files were not reconciled.
        artist_id: i64,
        /// Why the scan did not proceed.
        reason: ScanSkippedReason,
    },
    /// One folder finished enumeration and filtering.
    FolderScanned {
        /// The folder that was walked.
        folder: String,
        /// Number of media candidates that survived filtering.
        candidates: usize,
    },
    /// Scanning completed for an artist; the catalog reflects disk state.
    ArtistScanned {
        /// The artist whose scan completed.
        artist_id: i64,
    },
}

impl ScanEvent {
    fn description(&self) -> &str {
        match self {
            ScanEvent::ArtistScanSkipped { .. } => "Artist scan skipped",
            ScanEvent::FolderScanned { .. } => "Folder scan finished",
            ScanEvent::ArtistScanned { .. } => "Artist scan completed",
        }
    }
}

// ============================================================================
// Import List Events
// ============================================================================

/// Events emitted by the import list aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ListEvent {
    /// One source's fetch finished successfully.
    FetchCompleted {
        /// Display name of the source.
        source: String,
        /// Number of items it contributed before dedup.
        items: usize,
    },
    /// One source's fetch failed; siblings were unaffected.
    FetchFailed {
        /// Display name of the source.
        source: String,
        /// Human-readable failure message.
        message: String,
    },
}

impl ListEvent {
    fn description(&self) -> &str {
        match self {
            ListEvent::FetchCompleted { .. } => "Import list fetch completed",
            ListEvent::FetchFailed { .. } => "Import list fetch failed",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for publishing [`CoreEvent`]s.
///
/// Cloning is cheap; all clones publish into the same channel. Each
/// `subscribe()` call creates an independent receiver.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new event bus with the default buffer size.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are no active subscribers.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    ///
    /// Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// # Example
///
/// ```rust
/// use core_runtime::events::{EventBus, EventStream, CoreEvent};
///
/// let event_bus = EventBus::new(100);
/// let scan_stream = EventStream::new(event_bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Scan(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter function to this stream.
    ///
    /// Only events that match the filter will be returned by `recv()`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Receives the next event that passes the filter (if any).
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n`
    /// events, `RecvError::Closed` if all senders have been dropped.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;

            let Some(filter) = &self.filter else {
                return Ok(event);
            };

            if filter(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive an event without blocking.
    ///
    /// Returns `None` if no matching events are currently available.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    let Some(filter) = &self.filter else {
                        return Some(Ok(event));
                    };

                    if filter(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_creation() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);
        let event = CoreEvent::Scan(ScanEvent::ArtistScanned { artist_id: 1 });

        // Should error when no subscribers
        assert!(bus.emit(event).is_err());
    }

    #[tokio::test]
    async fn test_event_emission_with_subscribers() {
        let bus = EventBus::new(10);
        let mut sub = bus.subscribe();

        let event = CoreEvent::Scan(ScanEvent::ArtistScanSkipped {
            artist_id: 7,
            reason: ScanSkippedReason::RootFolderMissing,
        });

        let result = bus.emit(event.clone());
        assert_eq!(result.unwrap(), 1);

        let received = sub.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = CoreEvent::List(ListEvent::FetchCompleted {
            source: "Favorites".to_string(),
            items: 12,
        });

        bus.emit(event.clone()).ok();

        assert_eq!(sub1.recv().await.unwrap(), event);
        assert_eq!(sub2.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_event_stream_with_filter() {
        let bus = EventBus::new(10);
        let mut stream =
            EventStream::new(bus.subscribe()).filter(|event| matches!(event, CoreEvent::List(_)));

        // Scan event should be filtered out
        bus.emit(CoreEvent::Scan(ScanEvent::FolderScanned {
            folder: "/music".to_string(),
            candidates: 3,
        }))
        .ok();

        let list_event = CoreEvent::List(ListEvent::FetchFailed {
            source: "Charts".to_string(),
            message: "timed out".to_string(),
        });
        bus.emit(list_event.clone()).ok();

        assert_eq!(stream.recv().await.unwrap(), list_event);
    }

    #[tokio::test]
    async fn test_lagged_subscriber() {
        let bus = EventBus::new(2); // Very small buffer
        let mut sub = bus.subscribe();

        for i in 0..5 {
            bus.emit(CoreEvent::Scan(ScanEvent::ArtistScanned { artist_id: i }))
                .ok();
        }

        let result = sub.recv().await;
        assert!(matches!(result, Err(RecvError::Lagged(_))));
    }

    #[tokio::test]
    async fn test_event_severity() {
        let warn_event = CoreEvent::Scan(ScanEvent::ArtistScanSkipped {
            artist_id: 1,
            reason: ScanSkippedReason::RootFolderEmpty,
        });
        assert_eq!(warn_event.severity(), EventSeverity::Warning);

        let info_event = CoreEvent::Scan(ScanEvent::ArtistScanned { artist_id: 1 });
        assert_eq!(info_event.severity(), EventSeverity::Info);

        let debug_event = CoreEvent::Scan(ScanEvent::FolderScanned {
            folder: "/music".to_string(),
            candidates: 0,
        });
        assert_eq!(debug_event.severity(), EventSeverity::Debug);
    }

    #[tokio::test]
    async fn test_event_serialization() {
        let event = CoreEvent::Scan(ScanEvent::ArtistScanSkipped {
            artist_id: 3,
            reason: ScanSkippedReason::RootFolderMissing,
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RootFolderMissing"));

        let deserialized: CoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[tokio::test]
    async fn test_try_recv_empty() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe());

        assert!(stream.try_recv().is_none());
    }
}
