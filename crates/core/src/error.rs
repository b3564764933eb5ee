//! Error types
//!
//! Version conflicts and duplicate commands are expected outcomes and are
//! reported through [`AppendOutcome`](crate::AppendOutcome), never as errors.
//! The only fallible surface is opening a store from a configuration.

use thiserror::Error;

/// Invalid store configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Partitioned lock policy with zero partitions
    #[error("lock partitions must be greater than zero")]
    ZeroPartitions,

    /// Configuration text could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Store-level error
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration rejected
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
