//! Identity types
//!
//! - `AggregateId`: stable identity of an aggregate root
//! - `CommandId`: caller-supplied idempotency token
//! - `StreamKey`: the key a stream is stored under (id, optionally qualified by type)

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Identity of an aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(String);

impl AggregateId {
    /// Wrap an identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AggregateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AggregateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for AggregateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AggregateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identity of the command that produced an event.
///
/// Two events in the same stream never share a `CommandId`; a second append
/// carrying an already-recorded id is reported as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    /// Wrap a command identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random command id (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CommandId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CommandId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CommandId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Key of one stream in the store.
///
/// `aggregate_type` is empty unless the store runs with
/// [`KeyMode::IdAndType`](crate::KeyMode::IdAndType).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StreamKey {
    /// Aggregate type qualifier (empty when keyed by id alone)
    pub aggregate_type: String,
    /// Aggregate identity
    pub aggregate_id: AggregateId,
}

impl StreamKey {
    /// Key qualified by id only.
    pub fn untyped(aggregate_id: impl Into<AggregateId>) -> Self {
        Self {
            aggregate_type: String::new(),
            aggregate_id: aggregate_id.into(),
        }
    }

    /// Key qualified by type name and id.
    pub fn typed(aggregate_type: impl Into<String>, aggregate_id: impl Into<AggregateId>) -> Self {
        Self {
            aggregate_type: aggregate_type.into(),
            aggregate_id: aggregate_id.into(),
        }
    }

    /// True if the key carries no type qualifier.
    pub fn is_untyped(&self) -> bool {
        self.aggregate_type.is_empty()
    }

    /// Bytes used for stable hashing: `type 0x00 id`.
    pub fn hash_bytes(&self) -> Vec<u8> {
        let mut bytes =
            Vec::with_capacity(self.aggregate_type.len() + 1 + self.aggregate_id.as_str().len());
        bytes.extend_from_slice(self.aggregate_type.as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(self.aggregate_id.as_str().as_bytes());
        bytes
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_untyped() {
            write!(f, "{}", self.aggregate_id)
        } else {
            write!(f, "{}/{}", self.aggregate_type, self.aggregate_id)
        }
    }
}

impl From<&str> for StreamKey {
    fn from(s: &str) -> Self {
        Self::untyped(s)
    }
}

impl From<AggregateId> for StreamKey {
    fn from(id: AggregateId) -> Self {
        Self::untyped(id)
    }
}
