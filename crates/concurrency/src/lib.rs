//! Concurrency layer for streamvault
//!
//! This crate implements optimistic appends:
//! - PartitionedLocks: per-key exclusive sections (xxh3-partitioned)
//! - Validation: continuation, idempotency and contiguity checks
//! - AppendCoordinator: check-then-commit per stream, all-or-nothing

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coordinator;
pub mod lock_table;
pub mod validation;

pub use coordinator::{partition_by_stream, AppendCoordinator, SubBatch};
pub use lock_table::PartitionedLocks;
pub use validation::{
    validate_commands, validate_continuation, validate_contiguity, validate_sub_batch,
    ValidationResult,
};
