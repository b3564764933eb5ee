//! Core types for streamvault
//!
//! This crate defines the shared vocabulary of the store:
//! - Identity types (AggregateId, CommandId, StreamKey)
//! - The stored event record (EventStream)
//! - Append outcomes and conflict detail (AppendOutcome, Conflict)
//! - Store configuration (StoreConfig, KeyMode, LockPolicy)
//! - Error types (ConfigError, StoreError)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod event;
pub mod outcome;
pub mod types;

pub use config::{KeyMode, LockPolicy, StoreConfig};
pub use error::{ConfigError, StoreError, StoreResult};
pub use event::EventStream;
pub use outcome::{AppendOutcome, Conflict};
pub use types::{AggregateId, CommandId, StreamKey};
