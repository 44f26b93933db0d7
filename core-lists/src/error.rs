use thiserror::Error;

/// Errors produced while fetching import lists.
///
/// Per-source failures never escape the aggregator; they surface as
/// [`core_runtime::events::ListEvent::FetchFailed`] events instead.
#[derive(Debug, Error)]
pub enum ListError {
    /// The source's fetch itself failed.
    #[error("Import list fetch failed: {0}")]
    Fetch(String),

    /// The source did not answer within the configured timeout.
    #[error("Import list fetch timed out after {0}s")]
    Timeout(i64),

    /// The run was cancelled before this source completed.
    #[error("Import list fetch cancelled")]
    Cancelled,

    /// Last-sync bookkeeping failed.
    #[error("List status store error: {0}")]
    Status(String),
}

pub type Result<T> = std::result::Result<T, ListError>;
