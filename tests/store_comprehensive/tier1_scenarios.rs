//! Tier 1: Reference scenarios

use crate::test_utils::*;
use streamvault::{CommandId, EventStore, StreamKey};

/// New aggregate, three events in one batch
#[test]
fn scenario_a_new_aggregate_three_events() {
    let store = EventStore::ephemeral();

    let outcome = store.batch_append(vec![ev("A1", 1, "c1"), ev("A1", 2, "c2"), ev("A1", 3, "c3")]);

    assert_eq!(outcome.succeeded.len(), 1);
    assert!(outcome.has_succeeded(&StreamKey::from("A1")));
    assert!(outcome.duplicate_commands.is_empty());
    assert!(outcome.version_conflicts.is_empty());

    let events = store.query_range("A1", "Account", 1, 3);
    assert_eq!(versions(&events), vec![1, 2, 3]);
}

/// Reusing a recorded command id at the next version
#[test]
fn scenario_b_duplicate_command_at_next_version() {
    let store = EventStore::ephemeral();
    store.batch_append(vec![ev("A1", 1, "c1"), ev("A1", 2, "c2"), ev("A1", 3, "c3")]);

    let outcome = store.append(ev("A1", 4, "c1"));

    assert!(outcome.has_duplicate_command(&CommandId::from("c1")));
    assert!(outcome.succeeded.is_empty());
    assert!(outcome.version_conflicts.is_empty());
    assert_eq!(store.current_version("A1"), 3);
    assert!(store.find_by_version("A1", 4).is_none());
}

/// Batch skipping a version
#[test]
fn scenario_c_batch_skips_a_version() {
    let store = store_with("A1", 3);

    let outcome = store.batch_append(vec![ev("A1", 5, "c5"), ev("A1", 6, "c6")]);

    assert_eq!(
        outcome.version_conflicts.iter().cloned().collect::<Vec<_>>(),
        vec![StreamKey::from("A1")]
    );
    assert!(outcome.succeeded.is_empty());
    assert_eq!(store.current_version("A1"), 3);
    assert!(store.find_by_command("A1", "c5").is_none());
    assert_eq!(store.query_range("A1", "", 1, 10).len(), 3);
}

/// Range query on an aggregate that was never written
#[test]
fn scenario_d_unknown_aggregate_is_empty() {
    let store = store_with("A1", 3);

    let events = store.query_range("UNKNOWN", "Account", 1, 10);

    assert!(events.is_empty());
    assert_eq!(store.stats().stream_count, 1);
}
