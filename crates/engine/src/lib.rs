//! Engine layer for streamvault
//!
//! Ties storage and concurrency together behind one facade:
//! - `EventStore`: configured store (appends, queries, stats, ready futures)
//! - `QueryEngine`: read-only range and point lookups
//! - `AggregateEventStore`: the operation trait external layers build on

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ops;
pub mod query;
pub mod store;

pub use ops::AggregateEventStore;
pub use query::QueryEngine;
pub use store::{EventStore, StoreStats};
