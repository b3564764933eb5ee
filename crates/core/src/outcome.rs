//! Append outcomes
//!
//! A batch append never fails as a whole. Each aggregate in the batch ends up
//! in exactly one of three sets:
//!
//! - `succeeded`: every event of the aggregate was committed
//! - `duplicate_commands`: (by command id) the aggregate's events were
//!   discarded because a command id was already recorded
//! - `version_conflicts`: the aggregate's events were discarded because they
//!   did not continue the stream gap-free
//!
//! `conflicts` carries the detail behind each rejection.

use crate::types::{CommandId, StreamKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reason a sub-batch was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conflict {
    /// First submitted version does not continue the stream.
    VersionMismatch {
        /// Stream the sub-batch targeted
        key: StreamKey,
        /// Version the stream accepts next (`current_version + 1`)
        expected: u64,
        /// Version the sub-batch started at
        actual: u64,
    },

    /// Command id already recorded in the stream, or repeated in the sub-batch.
    DuplicateCommand {
        /// Stream the sub-batch targeted
        key: StreamKey,
        /// The repeated command id
        command_id: CommandId,
    },

    /// Two adjacent events in the sub-batch are not consecutive versions.
    NonContiguous {
        /// Stream the sub-batch targeted
        key: StreamKey,
        /// Version of the earlier event
        previous: u64,
        /// Version of the later event
        next: u64,
    },
}

impl Conflict {
    /// Stream the conflict belongs to.
    pub fn key(&self) -> &StreamKey {
        match self {
            Conflict::VersionMismatch { key, .. }
            | Conflict::DuplicateCommand { key, .. }
            | Conflict::NonContiguous { key, .. } => key,
        }
    }
}

/// Per-aggregate classification of a batch append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOutcome {
    /// Streams whose sub-batch was fully committed
    pub succeeded: BTreeSet<StreamKey>,
    /// Command ids rejected as already recorded
    pub duplicate_commands: BTreeSet<CommandId>,
    /// Streams whose sub-batch was rejected for a version mismatch
    pub version_conflicts: BTreeSet<StreamKey>,
    /// Detail for every rejection, in evaluation order
    pub conflicts: Vec<Conflict>,
}

impl AppendOutcome {
    /// Empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no sub-batch was rejected.
    pub fn is_success(&self) -> bool {
        self.duplicate_commands.is_empty() && self.version_conflicts.is_empty()
    }

    /// True if the stream was committed.
    pub fn has_succeeded(&self, key: &StreamKey) -> bool {
        self.succeeded.contains(key)
    }

    /// True if the stream was rejected for a version mismatch.
    pub fn has_version_conflict(&self, key: &StreamKey) -> bool {
        self.version_conflicts.contains(key)
    }

    /// True if the command id was rejected as a duplicate.
    pub fn has_duplicate_command(&self, command_id: &CommandId) -> bool {
        self.duplicate_commands.contains(command_id)
    }

    /// Conflicts recorded for one stream.
    pub fn conflicts_for<'a>(&'a self, key: &'a StreamKey) -> impl Iterator<Item = &'a Conflict> {
        self.conflicts.iter().filter(move |c| c.key() == key)
    }

    /// Record a committed stream.
    pub fn record_success(&mut self, key: StreamKey) {
        self.succeeded.insert(key);
    }

    /// Record a rejection. Duplicate-command conflicts populate
    /// `duplicate_commands`; version conflicts populate `version_conflicts`.
    pub fn record_conflict(&mut self, conflict: Conflict) {
        match &conflict {
            Conflict::DuplicateCommand { command_id, .. } => {
                self.duplicate_commands.insert(command_id.clone());
            }
            Conflict::VersionMismatch { key, .. } | Conflict::NonContiguous { key, .. } => {
                self.version_conflicts.insert(key.clone());
            }
        }
        self.conflicts.push(conflict);
    }
}
