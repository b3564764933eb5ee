//! Event record stored per aggregate
//!
//! An `EventStream` is one versioned entry in an aggregate's history: the
//! events produced by a single command, tagged with the version they bring
//! the aggregate to. The payload is opaque to the store.

use crate::types::{AggregateId, CommandId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One versioned entry in an aggregate's event stream.
///
/// Immutable once stored. The store shares stored records as
/// `Arc<EventStream>` and never hands out mutable access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStream {
    /// Aggregate this entry belongs to
    pub aggregate_id: AggregateId,
    /// Aggregate type name (keying input only under `KeyMode::IdAndType`)
    pub aggregate_type: String,
    /// 1-based version this entry brings the aggregate to
    pub version: u64,
    /// Command that produced this entry
    pub command_id: CommandId,
    /// Opaque payload
    pub payload: serde_json::Value,
    /// Producer-assigned timestamp
    pub timestamp: DateTime<Utc>,
    /// Free-form metadata
    #[serde(default)]
    pub items: BTreeMap<String, String>,
}

impl EventStream {
    /// Create a new entry with an empty type name and no items.
    pub fn new(
        aggregate_id: impl Into<AggregateId>,
        version: u64,
        command_id: impl Into<CommandId>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            aggregate_id: aggregate_id.into(),
            aggregate_type: String::new(),
            version,
            command_id: command_id.into(),
            payload,
            timestamp: Utc::now(),
            items: BTreeMap::new(),
        }
    }

    /// Set the aggregate type name
    pub fn with_type(mut self, aggregate_type: impl Into<String>) -> Self {
        self.aggregate_type = aggregate_type.into();
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Add a metadata item
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }
}
