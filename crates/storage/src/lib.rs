//! Storage layer for streamvault
//!
//! In-memory, append-only stream storage:
//! - `StreamTable`: DashMap from stream key to stream
//! - `AggregateStream`: one aggregate's indexed history behind an RwLock
//!
//! This crate does not decide what may be appended; that is the
//! coordinator's job. It only guarantees that a commit is visible all at once.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod stream;
pub mod table;

pub use stream::{AggregateStream, StreamState};
pub use table::StreamTable;
