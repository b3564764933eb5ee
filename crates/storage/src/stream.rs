//! Per-aggregate stream state
//!
//! An `AggregateStream` holds one aggregate's history behind a single
//! `RwLock`:
//!
//! - `by_version`: BTreeMap version → event, ordered for range reads
//! - `by_command`: FxHashMap command id → event, for idempotency checks
//! - `current_version`: highest stored version, 0 when empty
//!
//! A commit takes the write lock once for the whole sub-batch, so readers see
//! either none or all of it.

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use streamvault_core::{EventStream, StreamKey};

/// Indexed history of one aggregate.
///
/// Invariants:
/// - `by_version` keys are exactly `1..=current_version`
/// - `by_command[c].command_id == c` for every entry
/// - entries are never overwritten or removed
#[derive(Debug, Default)]
pub struct StreamState {
    current_version: u64,
    by_version: BTreeMap<u64, Arc<EventStream>>,
    by_command: FxHashMap<String, Arc<EventStream>>,
}

impl StreamState {
    /// State of an aggregate with no events.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Highest stored version (0 if none).
    #[inline]
    pub fn current_version(&self) -> u64 {
        self.current_version
    }

    /// Number of stored events.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_version.len()
    }

    /// True if no events are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_version.is_empty()
    }

    /// Event stored at `version`.
    #[inline]
    pub fn get_version(&self, version: u64) -> Option<Arc<EventStream>> {
        self.by_version.get(&version).cloned()
    }

    /// Event produced by `command_id`.
    #[inline]
    pub fn get_command(&self, command_id: &str) -> Option<Arc<EventStream>> {
        self.by_command.get(command_id).cloned()
    }

    /// True if `command_id` is already recorded.
    #[inline]
    pub fn contains_command(&self, command_id: &str) -> bool {
        self.by_command.contains_key(command_id)
    }

    /// Events with `min <= version <= max`, ascending. Empty if `min > max`.
    pub fn range(&self, min: u64, max: u64) -> Vec<Arc<EventStream>> {
        if min > max {
            return Vec::new();
        }
        self.by_version
            .range(min..=max)
            .map(|(_, event)| Arc::clone(event))
            .collect()
    }

    /// Append validated events.
    ///
    /// Callers must have checked that `events` continue the stream gap-free
    /// and carry unseen command ids.
    fn extend(&mut self, events: Vec<Arc<EventStream>>) {
        for event in events {
            debug_assert_eq!(event.version, self.current_version + 1);
            debug_assert!(!self.by_command.contains_key(event.command_id.as_str()));

            self.current_version = event.version;
            self.by_command
                .insert(event.command_id.as_str().to_string(), Arc::clone(&event));
            self.by_version.insert(event.version, event);
        }
    }
}

/// One aggregate's stream, shareable across threads.
#[derive(Debug)]
pub struct AggregateStream {
    key: StreamKey,
    state: RwLock<StreamState>,
}

impl AggregateStream {
    /// Create an empty stream.
    pub fn new(key: StreamKey) -> Self {
        Self {
            key,
            state: RwLock::new(StreamState::empty()),
        }
    }

    /// Create a stream already holding `events`.
    ///
    /// Used to build a stream completely before it is published to the
    /// table. Same preconditions as [`commit`](Self::commit).
    pub fn with_events(key: StreamKey, events: Vec<Arc<EventStream>>) -> Self {
        let mut state = StreamState::empty();
        state.extend(events);
        Self {
            key,
            state: RwLock::new(state),
        }
    }

    /// Key this stream is stored under.
    pub fn key(&self) -> &StreamKey {
        &self.key
    }

    /// Shared read access to the stream state.
    ///
    /// Hold the guard only as long as needed: commits on this stream wait
    /// for it.
    pub fn read(&self) -> RwLockReadGuard<'_, StreamState> {
        self.state.read()
    }

    /// Highest stored version (0 if none).
    pub fn current_version(&self) -> u64 {
        self.state.read().current_version()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// True if no events are stored.
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Append a validated sub-batch under one write lock.
    ///
    /// The caller must hold the append lock for this stream's key and have
    /// checked that `events` start at `current_version + 1`, are contiguous,
    /// and carry command ids not yet recorded.
    pub fn commit(&self, events: Vec<Arc<EventStream>>) {
        let mut state = self.state.write();
        state.extend(events);
    }
}
