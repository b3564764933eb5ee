//! # streamvault
//!
//! Volatile, process-local append-only event store for event-sourced
//! aggregates.
//!
//! - Per-aggregate streams with 1-based, gap-free versions
//! - Optimistic concurrency: a batch must continue the stream's current version
//! - Command idempotency: a command id is recorded at most once per stream
//! - All-or-nothing per aggregate; rejections are reported, never raised
//!
//! ```ignore
//! use streamvault::{EventStore, EventStream, StreamKey};
//! use serde_json::json;
//!
//! let store = EventStore::ephemeral();
//! let outcome = store.batch_append(vec![
//!     EventStream::new("A1", 1, "cmd-1", json!({"opened": true})),
//!     EventStream::new("A1", 2, "cmd-2", json!({"deposited": 10})),
//! ]);
//! assert!(outcome.has_succeeded(&StreamKey::from("A1")));
//!
//! let history = store.query_range("A1", "Account", 1, 2);
//! assert_eq!(history.len(), 2);
//! ```

pub mod types;

pub use types::*;

pub use streamvault_engine::{AggregateEventStore, EventStore, QueryEngine};
