//! Shared helpers for the comprehensive suite

use serde_json::json;
use std::sync::Arc;
use streamvault::{EventStore, EventStream};

/// Route store logs to the test harness. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

/// Event for `id` at `version` produced by `command`.
pub fn ev(id: &str, version: u64, command: &str) -> EventStream {
    EventStream::new(id, version, command, json!({ "aggregate": id, "version": version }))
}

/// Contiguous events `from..=to` with command ids `{id}-cmd-{v}`.
pub fn run(id: &str, from: u64, to: u64) -> Vec<EventStream> {
    (from..=to)
        .map(|v| ev(id, v, &format!("{}-cmd-{}", id, v)))
        .collect()
}

/// Store with `id` already at version `n`.
pub fn store_with(id: &str, n: u64) -> EventStore {
    init_tracing();
    let store = EventStore::ephemeral();
    if n > 0 {
        let outcome = store.batch_append(run(id, 1, n));
        assert!(outcome.is_success(), "seeding failed: {:?}", outcome);
    }
    store
}

/// Versions of a query result.
pub fn versions(events: &[Arc<EventStream>]) -> Vec<u64> {
    events.iter().map(|e| e.version).collect()
}

/// Assert that `id`'s stored versions are exactly `1..=current_version`.
pub fn assert_contiguous(store: &EventStore, id: &str) {
    let current = store.current_version(id);
    let all = store.query_range(id, "", 1, i64::MAX);
    let expected: Vec<u64> = (1..=current).collect();
    assert_eq!(versions(&all), expected, "stream {} is not contiguous", id);
}
