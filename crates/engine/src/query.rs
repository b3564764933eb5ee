//! Read-only queries over committed streams
//!
//! Queries never take append locks and never create streams. A query running
//! alongside an append sees the stream either before or after the commit.

use std::sync::Arc;
use streamvault_core::{AggregateId, EventStream, KeyMode, StreamKey};
use streamvault_storage::StreamTable;

/// Range and point lookups against a [`StreamTable`].
#[derive(Debug, Clone)]
pub struct QueryEngine {
    table: Arc<StreamTable>,
    key_mode: KeyMode,
}

impl QueryEngine {
    /// Create a query engine over `table`.
    pub fn new(table: Arc<StreamTable>, key_mode: KeyMode) -> Self {
        Self { table, key_mode }
    }

    fn key(&self, aggregate_id: &str, aggregate_type: &str) -> StreamKey {
        self.key_mode
            .key_for(&AggregateId::from(aggregate_id), aggregate_type)
    }

    /// Events with versions in `[max(1, min_version), min(max_version, current_version)]`,
    /// ascending.
    ///
    /// Empty for unknown aggregates and for empty or inverted ranges.
    /// `aggregate_type` only takes part in the lookup under `KeyMode::IdAndType`.
    pub fn query_range(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        min_version: i64,
        max_version: i64,
    ) -> Vec<Arc<EventStream>> {
        let Some(stream) = self.table.get(&self.key(aggregate_id, aggregate_type)) else {
            return Vec::new();
        };
        if max_version < 1 {
            return Vec::new();
        }

        let state = stream.read();
        let min = min_version.max(1) as u64;
        let max = (max_version as u64).min(state.current_version());
        state.range(min, max)
    }

    /// Event at `version`, if recorded.
    pub fn find_by_version(&self, aggregate_id: &str, version: u64) -> Option<Arc<EventStream>> {
        self.find_by_version_typed(aggregate_id, "", version)
    }

    /// Event at `version` in the stream keyed by type and id.
    pub fn find_by_version_typed(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        version: u64,
    ) -> Option<Arc<EventStream>> {
        self.table
            .get(&self.key(aggregate_id, aggregate_type))
            .and_then(|stream| stream.read().get_version(version))
    }

    /// Event produced by `command_id`, if recorded.
    pub fn find_by_command(&self, aggregate_id: &str, command_id: &str) -> Option<Arc<EventStream>> {
        self.find_by_command_typed(aggregate_id, "", command_id)
    }

    /// Event produced by `command_id` in the stream keyed by type and id.
    pub fn find_by_command_typed(
        &self,
        aggregate_id: &str,
        aggregate_type: &str,
        command_id: &str,
    ) -> Option<Arc<EventStream>> {
        self.table
            .get(&self.key(aggregate_id, aggregate_type))
            .and_then(|stream| stream.read().get_command(command_id))
    }

    /// Current version of an aggregate (0 if unknown).
    pub fn current_version(&self, aggregate_id: &str) -> u64 {
        self.current_version_typed(aggregate_id, "")
    }

    /// Current version of the stream keyed by type and id (0 if unknown).
    pub fn current_version_typed(&self, aggregate_id: &str, aggregate_type: &str) -> u64 {
        self.table
            .get(&self.key(aggregate_id, aggregate_type))
            .map(|stream| stream.current_version())
            .unwrap_or(0)
    }
}
