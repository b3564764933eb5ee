//! Event store operations
//!
//! The four operations other components program against. Persistence,
//! dispatch and transport layers wrap or decorate this trait instead of the
//! concrete store.
//!
//! ## Contract
//!
//! | Condition | Result |
//! |-----------|--------|
//! | First version ≠ current + 1 | key in `version_conflicts` |
//! | Command id already recorded | id in `duplicate_commands` |
//! | Versions in sub-batch not consecutive | key in `version_conflicts` |
//! | Unknown aggregate on read | empty / `None` |
//!
//! None of these are errors.

use crate::store::EventStore;
use std::sync::Arc;
use streamvault_core::{AppendOutcome, EventStream};

/// Append and lookup operations of an aggregate event store.
pub trait AggregateEventStore: Send + Sync {
    /// Append a batch spanning any number of aggregates.
    fn batch_append(&self, events: Vec<EventStream>) -> AppendOutcome;

    /// Events in `[max(1, min_version), min(max_version, current_version)]`, ascending.
    fn query_range(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        min_version: i64,
        max_version: i64,
    ) -> Vec<Arc<EventStream>>;

    /// Event at an exact version.
    ///
    /// Like `query_range`, `aggregate_type` only selects the stream under
    /// `KeyMode::IdAndType`.
    fn find_by_version(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        version: u64,
    ) -> Option<Arc<EventStream>>;

    /// Event produced by a command.
    fn find_by_command(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        command_id: &str,
    ) -> Option<Arc<EventStream>>;
}

impl AggregateEventStore for EventStore {
    fn batch_append(&self, events: Vec<EventStream>) -> AppendOutcome {
        EventStore::batch_append(self, events)
    }

    fn query_range(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        min_version: i64,
        max_version: i64,
    ) -> Vec<Arc<EventStream>> {
        EventStore::query_range(self, aggregate_id, aggregate_type, min_version, max_version)
    }

    fn find_by_version(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        version: u64,
    ) -> Option<Arc<EventStream>> {
        self.find_by_version_typed(aggregate_id, aggregate_type, version)
    }

    fn find_by_command(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        command_id: &str,
    ) -> Option<Arc<EventStream>> {
        self.find_by_command_typed(aggregate_id, aggregate_type, command_id)
    }
}
