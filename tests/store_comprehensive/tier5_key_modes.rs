//! Tier 5: Key modes and configuration

use crate::test_utils::*;
use streamvault::{
    AggregateEventStore, ConfigError, EventStore, KeyMode, LockPolicy, StoreConfig, StoreError,
    StreamKey,
};

fn typed_store() -> EventStore {
    EventStore::open(StoreConfig::new().key_mode(KeyMode::IdAndType)).unwrap()
}

#[test]
fn id_only_merges_types_into_one_stream() {
    let store = EventStore::ephemeral();

    let first = store.append(ev("42", 1, "c1").with_type("Order"));
    let second = store.append(ev("42", 1, "c2").with_type("Customer"));

    assert!(first.is_success());
    assert!(second.has_version_conflict(&StreamKey::from("42")));
}

#[test]
fn id_and_type_keeps_types_apart() {
    let store = typed_store();

    let outcome = store.batch_append(vec![
        ev("42", 1, "order-1").with_type("Order"),
        ev("42", 1, "customer-1").with_type("Customer"),
        ev("42", 2, "order-2").with_type("Order"),
    ]);

    assert!(outcome.has_succeeded(&StreamKey::typed("Order", "42")));
    assert!(outcome.has_succeeded(&StreamKey::typed("Customer", "42")));
    assert_eq!(store.stats().stream_count, 2);

    assert_eq!(versions(&store.query_range("42", "Order", 1, 10)), vec![1, 2]);
    assert_eq!(versions(&store.query_range("42", "Customer", 1, 10)), vec![1]);
    assert!(store.query_range("42", "Invoice", 1, 10).is_empty());
}

#[test]
fn typed_point_lookups() {
    let store = typed_store();
    store.append(ev("42", 1, "order-1").with_type("Order"));

    let queries = store.queries();
    assert!(queries.find_by_version_typed("42", "Order", 1).is_some());
    assert!(queries.find_by_version_typed("42", "Customer", 1).is_none());
    assert!(queries.find_by_command_typed("42", "Order", "order-1").is_some());
    assert_eq!(queries.current_version_typed("42", "Order"), 1);
    assert_eq!(queries.current_version_typed("42", "Customer"), 0);
}

#[test]
fn duplicate_check_is_per_typed_stream() {
    let store = typed_store();
    store.append(ev("42", 1, "shared").with_type("Order"));

    let other_type = store.append(ev("42", 1, "shared").with_type("Customer"));
    assert!(other_type.is_success());
}

#[test]
fn config_from_toml() {
    let config = StoreConfig::from_toml_str(
        r#"
        key_mode = "id_and_type"
        initial_capacity = 128

        [lock_policy]
        kind = "partitioned"
        partitions = 8
        "#,
    )
    .unwrap();

    assert_eq!(config.key_mode, KeyMode::IdAndType);
    assert_eq!(config.lock_policy, LockPolicy::Partitioned { partitions: 8 });
    assert_eq!(config.initial_capacity, 128);

    let store = EventStore::open(config).unwrap();
    assert_eq!(store.config().key_mode, KeyMode::IdAndType);
}

#[test]
fn config_from_toml_global_lock() {
    let config = StoreConfig::from_toml_str(
        r#"
        [lock_policy]
        kind = "global"
        "#,
    )
    .unwrap();

    assert_eq!(config.lock_policy, LockPolicy::Global);
    assert_eq!(config.key_mode, KeyMode::IdOnly);
}

#[test]
fn config_rejects_zero_partitions() {
    let err = StoreConfig::from_toml_str(
        r#"
        [lock_policy]
        kind = "partitioned"
        partitions = 0
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ZeroPartitions));

    let open = EventStore::open(StoreConfig::new().lock_policy(LockPolicy::Partitioned { partitions: 0 }));
    assert!(matches!(open, Err(StoreError::Config(ConfigError::ZeroPartitions))));
}

#[test]
fn config_rejects_malformed_toml() {
    let err = StoreConfig::from_toml_str("key_mode = 7").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn store_usable_as_trait_object() {
    let store: Box<dyn AggregateEventStore> = Box::new(EventStore::ephemeral());
    assert!(store.batch_append(run("A1", 1, 3)).is_success());
    assert_eq!(store.query_range("A1", "", 2, 3).len(), 2);
    assert!(store.find_by_command("A1", "", "A1-cmd-3").is_some());
}

#[test]
fn typed_round_trip_through_trait_object() {
    let store = typed_store();
    let store: &dyn AggregateEventStore = &store;
    let submitted = vec![
        ev("42", 1, "order-1").with_type("Order"),
        ev("42", 2, "order-2").with_type("Order"),
        ev("42", 1, "customer-1").with_type("Customer"),
    ];
    assert!(store.batch_append(submitted.clone()).is_success());

    for event in &submitted {
        let ty = event.aggregate_type.as_str();
        let by_version = store.find_by_version("42", ty, event.version).unwrap();
        let by_command = store
            .find_by_command("42", ty, event.command_id.as_str())
            .unwrap();
        assert_eq!(*by_version, *event);
        assert_eq!(*by_command, *event);
    }

    assert!(store.find_by_version("42", "", 1).is_none());
    assert!(store.find_by_command("42", "Customer", "order-1").is_none());
}

#[test]
fn typed_current_version_on_facade() {
    let store = typed_store();
    store.batch_append(vec![
        ev("42", 1, "order-1").with_type("Order"),
        ev("42", 2, "order-2").with_type("Order"),
    ]);

    assert_eq!(store.current_version_typed("42", "Order"), 2);
    assert_eq!(store.current_version_typed("42", "Customer"), 0);
    assert_eq!(
        store.find_by_version_typed("42", "Order", 2).unwrap().command_id.as_str(),
        "order-2"
    );
    assert!(store.find_by_command_typed("42", "Order", "order-1").is_some());
}

#[tokio::test]
async fn ready_wrappers_resolve_immediately() {
    let store = store_with("A1", 2);
    let found = store.find_by_version_ready("A1", "", 2).await;
    assert_eq!(found.unwrap().version, 2);

    let outcome = store.batch_append_ready(run("A1", 3, 3)).await;
    assert!(outcome.is_success());
    assert_eq!(store.query_range_ready("A1", "", 1, 10).await.len(), 3);
}

#[tokio::test]
async fn typed_ready_wrappers_find_typed_streams() {
    let store = typed_store();
    store.append(ev("42", 1, "order-1").with_type("Order"));

    assert!(store.find_by_version_ready("42", "Order", 1).await.is_some());
    assert!(store.find_by_command_ready("42", "Order", "order-1").await.is_some());
    assert!(store.find_by_version_ready("42", "", 1).await.is_none());
}
