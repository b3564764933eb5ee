//! Store configuration
//!
//! ```ignore
//! use streamvault_core::{KeyMode, LockPolicy, StoreConfig};
//!
//! let config = StoreConfig::new()
//!     .key_mode(KeyMode::IdAndType)
//!     .lock_policy(LockPolicy::Partitioned { partitions: 16 });
//! ```
//!
//! The same settings can be read from TOML:
//!
//! ```toml
//! key_mode = "id_and_type"
//! initial_capacity = 1024
//!
//! [lock_policy]
//! kind = "partitioned"
//! partitions = 16
//! ```

use crate::error::ConfigError;
use crate::types::{AggregateId, StreamKey};
use serde::{Deserialize, Serialize};

/// Default number of lock partitions
pub const DEFAULT_LOCK_PARTITIONS: usize = 64;

/// How stream keys are derived from an event's identity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    /// Keyed by aggregate id alone; the type name is carried but ignored (default).
    #[default]
    IdOnly,
    /// Keyed by aggregate type name and id; equal ids under different types
    /// are separate streams.
    IdAndType,
}

impl KeyMode {
    /// Derive the stream key for an aggregate.
    pub fn key_for(&self, aggregate_id: &AggregateId, aggregate_type: &str) -> StreamKey {
        match self {
            KeyMode::IdOnly => StreamKey::untyped(aggregate_id.clone()),
            KeyMode::IdAndType => StreamKey::typed(aggregate_type, aggregate_id.clone()),
        }
    }
}

/// Mutual exclusion policy for appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LockPolicy {
    /// One exclusive section for the whole store.
    Global,
    /// Exclusive sections partitioned by a stable hash of the stream key.
    Partitioned {
        /// Number of partitions
        partitions: usize,
    },
}

impl LockPolicy {
    /// Number of lock partitions this policy needs.
    pub fn partitions(&self) -> usize {
        match self {
            LockPolicy::Global => 1,
            LockPolicy::Partitioned { partitions } => *partitions,
        }
    }
}

impl Default for LockPolicy {
    fn default() -> Self {
        LockPolicy::Partitioned {
            partitions: DEFAULT_LOCK_PARTITIONS,
        }
    }
}

/// Options for opening a store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Stream key derivation
    pub key_mode: KeyMode,
    /// Append mutual exclusion policy
    pub lock_policy: LockPolicy,
    /// Expected number of streams (pre-sizes the stream table)
    pub initial_capacity: usize,
}

impl StoreConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key mode.
    pub fn key_mode(mut self, mode: KeyMode) -> Self {
        self.key_mode = mode;
        self
    }

    /// Set the lock policy.
    pub fn lock_policy(mut self, policy: LockPolicy) -> Self {
        self.lock_policy = policy;
        self
    }

    /// Set the expected number of streams.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check the config for settings the store cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lock_policy.partitions() == 0 {
            return Err(ConfigError::ZeroPartitions);
        }
        Ok(())
    }

    /// Parse and validate a TOML config. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
