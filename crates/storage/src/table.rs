//! Stream table - DashMap by stream key
//!
//! # Design
//!
//! - DashMap: sharded, concurrent lookups and inserts
//! - Values are `Arc<AggregateStream>`; a lookup clones the Arc and drops the
//!   shard guard immediately, so readers never hold a DashMap shard while
//!   reading stream state
//! - Streams are published once, fully built, and never removed
//!
//! # Thread Safety
//!
//! - get(): shard read, no stream lock taken
//! - publish(): locks only the target shard
//! - Different streams never contend on stream state

use crate::stream::AggregateStream;
use dashmap::DashMap;
use std::sync::Arc;
use streamvault_core::StreamKey;
use tracing::trace;

/// Concurrent mapping from stream key to stream.
pub struct StreamTable {
    streams: DashMap<StreamKey, Arc<AggregateStream>>,
}

impl StreamTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            streams: DashMap::new(),
        }
    }

    /// Create with an expected number of streams
    pub fn with_capacity(num_streams: usize) -> Self {
        Self {
            streams: DashMap::with_capacity(num_streams),
        }
    }

    /// Look up a stream. Never creates an entry.
    #[inline]
    pub fn get(&self, key: &StreamKey) -> Option<Arc<AggregateStream>> {
        self.streams.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a stream exists
    #[inline]
    pub fn contains(&self, key: &StreamKey) -> bool {
        self.streams.contains_key(key)
    }

    /// Publish a fully built stream.
    ///
    /// If a stream is already present under the same key, the existing one
    /// is kept and returned. Callers serialize publication per key with the
    /// append lock, so this only happens on misuse.
    pub fn publish(&self, stream: AggregateStream) -> Arc<AggregateStream> {
        let key = stream.key().clone();
        let entry = self
            .streams
            .entry(key)
            .or_insert_with(|| Arc::new(stream));
        trace!(key = %entry.key(), "stream published");
        Arc::clone(entry.value())
    }

    /// Get number of streams
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Get total number of events across all streams
    pub fn total_events(&self) -> usize {
        self.streams.iter().map(|entry| entry.value().len()).sum()
    }
}

impl Default for StreamTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StreamTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTable")
            .field("stream_count", &self.stream_count())
            .field("total_events", &self.total_events())
            .finish()
    }
}
