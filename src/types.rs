//! Public types for the streamvault API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Public API types - these are what users should use
// ============================================================================

// Identity types
pub use streamvault_core::{AggregateId, CommandId, StreamKey};

// Event record
pub use streamvault_core::EventStream;

// Append outcome and rejection detail
pub use streamvault_core::{AppendOutcome, Conflict};

// Configuration
pub use streamvault_core::{KeyMode, LockPolicy, StoreConfig};

// Errors
pub use streamvault_core::{ConfigError, StoreError, StoreResult};

// Store statistics
pub use streamvault_engine::StoreStats;
