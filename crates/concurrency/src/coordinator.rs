//! Append coordinator
//!
//! Splits a batch by stream, then for each stream, under that stream's
//! append lock:
//!
//! 1. snapshot the stream state (or an empty state for a new stream)
//! 2. validate the sub-batch (continuation, idempotency, contiguity)
//! 3. commit the whole sub-batch, or nothing
//!
//! Streams are independent: a rejection in one never affects another.
//! Rejections are data in the returned [`AppendOutcome`], never errors.

use crate::lock_table::PartitionedLocks;
use crate::validation::validate_sub_batch;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;
use streamvault_core::{AppendOutcome, EventStream, KeyMode, LockPolicy, StreamKey};
use streamvault_storage::{AggregateStream, StreamState, StreamTable};
use tracing::debug;

/// Events of one stream, in submission order.
pub type SubBatch = SmallVec<[EventStream; 4]>;

/// Group events by stream key, preserving each stream's relative order.
///
/// Streams come out in order of first appearance.
pub fn partition_by_stream(key_mode: KeyMode, events: Vec<EventStream>) -> Vec<(StreamKey, SubBatch)> {
    let mut index: FxHashMap<StreamKey, usize> = FxHashMap::default();
    let mut groups: Vec<(StreamKey, SubBatch)> = Vec::new();

    for event in events {
        let key = key_mode.key_for(&event.aggregate_id, &event.aggregate_type);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(event),
            None => {
                index.insert(key.clone(), groups.len());
                let mut batch = SubBatch::new();
                batch.push(event);
                groups.push((key, batch));
            }
        }
    }

    groups
}

/// Validates and commits batches against a shared [`StreamTable`].
pub struct AppendCoordinator {
    table: Arc<StreamTable>,
    locks: PartitionedLocks,
    key_mode: KeyMode,
}

impl AppendCoordinator {
    /// Create a coordinator over `table`.
    pub fn new(table: Arc<StreamTable>, key_mode: KeyMode, lock_policy: LockPolicy) -> Self {
        Self {
            table,
            locks: PartitionedLocks::for_policy(lock_policy),
            key_mode,
        }
    }

    /// Key derivation in use.
    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    /// Number of append lock partitions.
    pub fn lock_partitions(&self) -> usize {
        self.locks.len()
    }

    /// Append a batch spanning any number of streams.
    pub fn batch_append(&self, events: Vec<EventStream>) -> AppendOutcome {
        let mut outcome = AppendOutcome::new();
        for (key, sub_batch) in partition_by_stream(self.key_mode, events) {
            self.append_stream(key, sub_batch, &mut outcome);
        }
        outcome
    }

    /// Append a single event.
    pub fn append(&self, event: EventStream) -> AppendOutcome {
        self.batch_append(vec![event])
    }

    fn append_stream(&self, key: StreamKey, events: SubBatch, outcome: &mut AppendOutcome) {
        let _guard = self.locks.lock(&key);

        let existing = self.table.get(&key);
        let validation = match &existing {
            Some(stream) => validate_sub_batch(&key, &stream.read(), &events),
            None => validate_sub_batch(&key, &StreamState::empty(), &events),
        };

        if !validation.is_valid() {
            for conflict in validation.conflicts {
                debug!(stream = %key, conflict = ?conflict, "append rejected");
                outcome.record_conflict(conflict);
            }
            return;
        }

        let (first, last, count) = match (events.first(), events.last()) {
            (Some(first), Some(last)) => (first.version, last.version, events.len()),
            _ => return,
        };
        let events: Vec<Arc<EventStream>> = events.into_iter().map(Arc::new).collect();

        match existing {
            Some(stream) => stream.commit(events),
            None => {
                self.table.publish(AggregateStream::with_events(key.clone(), events));
            }
        }

        debug!(stream = %key, first, last, count, "sub-batch committed");
        outcome.record_success(key);
    }
}

impl std::fmt::Debug for AppendCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppendCoordinator")
            .field("key_mode", &self.key_mode)
            .field("lock_partitions", &self.locks.len())
            .finish()
    }
}
