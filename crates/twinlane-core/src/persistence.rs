//! Snapshot import and export.
//!
//! The snapshot is written verbatim as JSON. Import rejects documents that
//! parse but break a data-model invariant, so a loaded match always plays on
//! from a valid state. Unknown top-level keys (such as an export timestamp)
//! are ignored.

use crate::error::SnapshotError;
use crate::state::GameState;

/// Serializes a snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] if serialization fails.
pub fn export_json(state: &GameState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parses and validates a snapshot.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] for malformed JSON and
/// [`SnapshotError::Invalid`] for snapshots that break an invariant.
pub fn import_json(json: &str) -> Result<GameState, SnapshotError> {
    let state: GameState = serde_json::from_str(json)?;
    state.validate()?;
    Ok(state)
}
