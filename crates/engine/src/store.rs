//! Event store facade
//!
//! `EventStore` owns one stream table and wires an [`AppendCoordinator`] and a
//! [`QueryEngine`] over it. It is `Send + Sync`; share it with `Arc`.
//!
//! # Example
//!
//! ```ignore
//! use streamvault_engine::EventStore;
//! use streamvault_core::EventStream;
//!
//! let store = EventStore::ephemeral();
//! let outcome = store.batch_append(vec![
//!     EventStream::new("order-1", 1, "cmd-1", payload1),
//!     EventStream::new("order-1", 2, "cmd-2", payload2),
//! ]);
//! assert!(outcome.is_success());
//!
//! let history = store.query_range("order-1", "Order", 1, i64::MAX);
//! ```

use crate::query::QueryEngine;
use std::future::{ready, Ready};
use std::sync::Arc;
use streamvault_concurrency::AppendCoordinator;
use streamvault_core::{AppendOutcome, EventStream, StoreConfig, StoreResult};
use streamvault_storage::StreamTable;
use tracing::info;

/// Point-in-time counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Number of streams with at least one event
    pub stream_count: usize,
    /// Number of stored events across all streams
    pub event_count: usize,
}

/// In-memory event store.
pub struct EventStore {
    config: StoreConfig,
    table: Arc<StreamTable>,
    coordinator: AppendCoordinator,
    queries: QueryEngine,
}

impl EventStore {
    /// Open a store with a validated configuration.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        info!(
            key_mode = ?config.key_mode,
            lock_policy = ?config.lock_policy,
            initial_capacity = config.initial_capacity,
            "event store opened"
        );
        Ok(Self::build(config))
    }

    /// Open a store with the default configuration.
    pub fn ephemeral() -> Self {
        Self::build(StoreConfig::default())
    }

    fn build(config: StoreConfig) -> Self {
        let table = Arc::new(StreamTable::with_capacity(config.initial_capacity));
        let coordinator =
            AppendCoordinator::new(Arc::clone(&table), config.key_mode, config.lock_policy);
        let queries = QueryEngine::new(Arc::clone(&table), config.key_mode);
        Self {
            config,
            table,
            coordinator,
            queries,
        }
    }

    /// Configuration the store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Query engine over this store's streams.
    pub fn queries(&self) -> &QueryEngine {
        &self.queries
    }

    // =========================================================================
    // Appends
    // =========================================================================

    /// Append a batch spanning any number of aggregates.
    ///
    /// Each aggregate's events are committed all-or-nothing, independently of
    /// the others; see [`AppendOutcome`].
    pub fn batch_append(&self, events: Vec<EventStream>) -> AppendOutcome {
        self.coordinator.batch_append(events)
    }

    /// Append a single event.
    pub fn append(&self, event: EventStream) -> AppendOutcome {
        self.coordinator.append(event)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Events of an aggregate within the clipped version range, ascending.
    pub fn query_range(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        min_version: i64,
        max_version: i64,
    ) -> Vec<Arc<EventStream>> {
        self.queries
            .query_range(aggregate_id, aggregate_type, min_version, max_version)
    }

    /// Event at an exact version.
    pub fn find_by_version(&self, aggregate_id: &str, version: u64) -> Option<Arc<EventStream>> {
        self.queries.find_by_version(aggregate_id, version)
    }

    /// Event produced by a command.
    pub fn find_by_command(&self, aggregate_id: &str, command_id: &str) -> Option<Arc<EventStream>> {
        self.queries.find_by_command(aggregate_id, command_id)
    }

    /// Current version of an aggregate (0 if unknown).
    pub fn current_version(&self, aggregate_id: &str) -> u64 {
        self.queries.current_version(aggregate_id)
    }

    /// Event at an exact version, in the stream selected by type and id.
    ///
    /// Under `KeyMode::IdOnly` the type name is ignored.
    pub fn find_by_version_typed(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        version: u64,
    ) -> Option<Arc<EventStream>> {
        self.queries
            .find_by_version_typed(aggregate_id, aggregate_type, version)
    }

    /// Event produced by a command, in the stream selected by type and id.
    pub fn find_by_command_typed(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        command_id: &str,
    ) -> Option<Arc<EventStream>> {
        self.queries
            .find_by_command_typed(aggregate_id, aggregate_type, command_id)
    }

    /// Current version of the stream selected by type and id (0 if unknown).
    pub fn current_version_typed(&self, aggregate_id: &str, aggregate_type: &str) -> u64 {
        self.queries.current_version_typed(aggregate_id, aggregate_type)
    }

    /// Stream and event counts.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            stream_count: self.table.stream_count(),
            event_count: self.table.total_events(),
        }
    }

    // =========================================================================
    // Ready futures
    //
    // For callers with an async-shaped contract. The work runs synchronously
    // and the returned future is already complete.
    // =========================================================================

    /// [`batch_append`](Self::batch_append) as a completed future.
    pub fn batch_append_ready(&self, events: Vec<EventStream>) -> Ready<AppendOutcome> {
        ready(self.batch_append(events))
    }

    /// [`query_range`](Self::query_range) as a completed future.
    pub fn query_range_ready(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        min_version: i64,
        max_version: i64,
    ) -> Ready<Vec<Arc<EventStream>>> {
        ready(self.query_range(aggregate_id, aggregate_type, min_version, max_version))
    }

    /// [`find_by_version_typed`](Self::find_by_version_typed) as a completed future.
    pub fn find_by_version_ready(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        version: u64,
    ) -> Ready<Option<Arc<EventStream>>> {
        ready(self.find_by_version_typed(aggregate_id, aggregate_type, version))
    }

    /// [`find_by_command_typed`](Self::find_by_command_typed) as a completed future.
    pub fn find_by_command_ready(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        command_id: &str,
    ) -> Ready<Option<Arc<EventStream>>> {
        ready(self.find_by_command_typed(aggregate_id, aggregate_type, command_id))
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::ephemeral()
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("config", &self.config)
            .field("table", &self.table)
            .finish()
    }
}
