//! Import list aggregation.
//!
//! Fetches every enabled, due source concurrently and merges the results
//! in configured source order. A misbehaving source is isolated: it gets
//! a failure event and contributes nothing, while its siblings proceed.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use bridge_traits::Clock;
use core_runtime::events::{CoreEvent, EventBus, ListEvent};

use crate::error::{ListError, Result};
use crate::source::{ImportList, ImportListItem};
use crate::status::ListStatusStore;

/// Aggregator tuning.
#[derive(Debug, Clone, Default)]
pub struct AggregatorConfig {
    /// Per-source fetch timeout. `None` lets a source take as long as it
    /// likes.
    pub fetch_timeout: Option<std::time::Duration>,
}

/// Fetches and merges import list sources.
pub struct ListAggregator {
    config: AggregatorConfig,
    status: Arc<dyn ListStatusStore>,
    clock: Arc<dyn Clock>,
    events: EventBus,
}

impl ListAggregator {
    pub fn new(
        config: AggregatorConfig,
        status: Arc<dyn ListStatusStore>,
        clock: Arc<dyn Clock>,
        events: EventBus,
    ) -> Self {
        Self {
            config,
            status,
            clock,
            events,
        }
    }

    /// Fetch every enabled, due source and merge the results.
    ///
    /// Merge order follows the order of `sources`, so an item contributed
    /// by an earlier source wins over a later duplicate. Individual
    /// source failures are reported via [`ListEvent::FetchFailed`] and
    /// never fail the aggregation.
    #[instrument(skip_all, fields(sources = sources.len()))]
    pub async fn fetch_all(
        &self,
        sources: &[Arc<dyn ImportList>],
        cancel: CancellationToken,
    ) -> Result<Vec<ImportListItem>> {
        let now = self.clock.now();

        let mut due: Vec<(usize, Arc<dyn ImportList>)> = Vec::new();
        let mut names: HashMap<usize, (i64, String)> = HashMap::new();

        for (index, source) in sources.iter().enumerate() {
            let definition = source.definition();
            if !definition.enabled {
                continue;
            }

            let last_sync = self.status.last_sync(definition.id).await?;
            if !definition.is_due(last_sync, now) {
                debug!(
                    "Skipping {} due to minimum refresh interval",
                    definition.name
                );
                continue;
            }

            names.insert(index, (definition.id, definition.name.clone()));
            due.push((index, Arc::clone(source)));
        }

        let mut tasks: JoinSet<(usize, Result<Vec<ImportListItem>>)> = JoinSet::new();
        for (index, source) in due {
            let cancel = cancel.clone();
            let timeout = self.config.fetch_timeout;
            tasks.spawn(async move {
                let result = tokio::select! {
                    _ = cancel.cancelled() => Err(ListError::Cancelled),
                    fetched = fetch_with_timeout(source, timeout) => fetched,
                };
                (index, result)
            });
        }

        let mut fetched: BTreeMap<usize, Vec<ImportListItem>> = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("Import list task failed to complete: {}", e);
                    continue;
                }
            };

            let (source_id, source_name) = &names[&index];
            match result {
                Ok(items) => {
                    info!("Found {} items from {}", items.len(), source_name);
                    self.status.record_sync(*source_id, now).await?;
                    let _ = self.events.emit(CoreEvent::List(ListEvent::FetchCompleted {
                        source: source_name.clone(),
                        items: items.len(),
                    }));
                    fetched.insert(index, items);
                }
                Err(e) => {
                    warn!("Error fetching items from {}: {}", source_name, e);
                    let _ = self.events.emit(CoreEvent::List(ListEvent::FetchFailed {
                        source: source_name.clone(),
                        message: e.to_string(),
                    }));
                }
            }
        }

        let merged: Vec<ImportListItem> = fetched.into_values().flatten().collect();
        Ok(dedup_items(merged))
    }

    /// Fetch one source, honoring its refresh interval.
    ///
    /// A failure is reported over the event bus and yields an empty list.
    #[instrument(skip_all, fields(source = %source.definition().name))]
    pub async fn fetch_single(&self, source: Arc<dyn ImportList>) -> Result<Vec<ImportListItem>> {
        let definition = source.definition();
        if !definition.enabled {
            debug!("Import list not enabled, skipping");
            return Ok(Vec::new());
        }

        let now = self.clock.now();
        let last_sync = self.status.last_sync(definition.id).await?;
        if !definition.is_due(last_sync, now) {
            debug!(
                "Skipping {} due to minimum refresh interval",
                definition.name
            );
            return Ok(Vec::new());
        }

        let source_id = definition.id;
        let source_name = definition.name.clone();

        match fetch_with_timeout(Arc::clone(&source), self.config.fetch_timeout).await {
            Ok(items) => {
                self.status.record_sync(source_id, now).await?;
                let _ = self.events.emit(CoreEvent::List(ListEvent::FetchCompleted {
                    source: source_name,
                    items: items.len(),
                }));
                Ok(dedup_items(items))
            }
            Err(e) => {
                warn!("Error fetching items from {}: {}", source_name, e);
                let _ = self.events.emit(CoreEvent::List(ListEvent::FetchFailed {
                    source: source_name,
                    message: e.to_string(),
                }));
                Ok(Vec::new())
            }
        }
    }
}

async fn fetch_with_timeout(
    source: Arc<dyn ImportList>,
    timeout: Option<std::time::Duration>,
) -> Result<Vec<ImportListItem>> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(ListError::Timeout(limit.as_secs() as i64)),
        },
        None => source.fetch().await,
    }
}

/// Drop duplicate items, keeping the first occurrence of each key.
fn dedup_items(items: Vec<ImportListItem>) -> Vec<ImportListItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.natural_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut first = ImportListItem::new("Band", "Album");
        first.foreign_id = Some("from-first-source".to_string());
        let mut second = ImportListItem::new("band", " album ");
        second.foreign_id = Some("from-second-source".to_string());

        let deduped = dedup_items(vec![first.clone(), second]);
        assert_eq!(deduped, vec![first]);
    }

    #[test]
    fn test_dedup_preserves_distinct_items() {
        let items = vec![
            ImportListItem::new("Band", "Album"),
            ImportListItem::new("Band", "Other Album"),
            ImportListItem::new("Other Band", "Album"),
        ];
        assert_eq!(dedup_items(items.clone()), items);
    }
}
