//! Sub-batch validation for optimistic appends
//!
//! Checks run in a fixed order and stop at the first failing stage:
//!
//! 1. Continuation: the first version must be `current_version + 1`
//! 2. Idempotency: no command id may already be recorded (or repeat within
//!    the sub-batch); every offending id is reported
//! 3. Contiguity: adjacent versions must increase by exactly one
//!
//! Validation only reads the stream state. The caller holds the append lock
//! for the stream key, so the state cannot move between validation and commit.

use rustc_hash::FxHashSet;
use streamvault_core::{Conflict, EventStream, StreamKey};
use streamvault_storage::StreamState;

/// Conflicts found by one validation stage.
///
/// Empty means the stage passed.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Reasons the sub-batch cannot commit
    pub conflicts: Vec<Conflict>,
}

impl ValidationResult {
    /// Stage passed.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Stage failed for one reason.
    pub fn conflict(conflict: Conflict) -> Self {
        Self {
            conflicts: vec![conflict],
        }
    }

    /// True if the stage found nothing.
    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Check that the sub-batch starts right after the stream's current version.
pub fn validate_continuation(
    key: &StreamKey,
    state: &StreamState,
    events: &[EventStream],
) -> ValidationResult {
    let expected = state.current_version() + 1;
    match events.first() {
        Some(first) if first.version != expected => {
            ValidationResult::conflict(Conflict::VersionMismatch {
                key: key.clone(),
                expected,
                actual: first.version,
            })
        }
        _ => ValidationResult::ok(),
    }
}

/// Report every command id that is already recorded or repeats in the batch.
///
/// Each offending id is reported once.
pub fn validate_commands(
    key: &StreamKey,
    state: &StreamState,
    events: &[EventStream],
) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut reported: FxHashSet<&str> = FxHashSet::default();

    for event in events {
        let command_id = event.command_id.as_str();
        let repeated = !seen.insert(command_id);
        if (repeated || state.contains_command(command_id)) && reported.insert(command_id) {
            result.conflicts.push(Conflict::DuplicateCommand {
                key: key.clone(),
                command_id: event.command_id.clone(),
            });
        }
    }

    result
}

/// Check that versions inside the sub-batch are consecutive.
pub fn validate_contiguity(key: &StreamKey, events: &[EventStream]) -> ValidationResult {
    for pair in events.windows(2) {
        let (previous, next) = (pair[0].version, pair[1].version);
        if previous.checked_add(1) != Some(next) {
            return ValidationResult::conflict(Conflict::NonContiguous {
                key: key.clone(),
                previous,
                next,
            });
        }
    }
    ValidationResult::ok()
}

/// Run all checks in order, stopping at the first stage that fails.
pub fn validate_sub_batch(
    key: &StreamKey,
    state: &StreamState,
    events: &[EventStream],
) -> ValidationResult {
    let continuation = validate_continuation(key, state, events);
    if !continuation.is_valid() {
        return continuation;
    }

    let commands = validate_commands(key, state, events);
    if !commands.is_valid() {
        return commands;
    }

    validate_contiguity(key, events)
}
