//! Checkpoint and resume for puzzle sessions.
//!
//! A session is persisted after every operation as a JSON envelope under a
//! key derived from the puzzle id, and restored verbatim on the next load
//! if it still describes a valid session for that puzzle.

use crate::core::{PuzzleDefinition, PuzzleId, SessionState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;

pub mod error;
pub mod store;

pub use error::CheckpointError;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Store key for a puzzle's session: `"<namespace>:<id>"`.
pub fn storage_key(namespace: &str, id: &PuzzleId) -> String {
    format!("{namespace}:{id}")
}

/// Serializable checkpoint of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Puzzle the session belongs to
    pub puzzle_id: PuzzleId,

    /// When checkpoint was created
    pub saved_at: DateTime<Utc>,

    /// Complete session state
    pub state: SessionState,
}

impl SessionCheckpoint {
    pub fn new(state: &SessionState) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            puzzle_id: state.puzzle_id().clone(),
            saved_at: Utc::now(),
            state: state.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(raw).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Turn the checkpoint back into a session for `definition`.
    ///
    /// Fails if the version is unknown, the checkpoint names another
    /// puzzle, or the state breaks any session invariant.
    pub fn restore(self, definition: &PuzzleDefinition) -> Result<SessionState, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if self.puzzle_id != definition.id || self.state.puzzle_id() != &definition.id {
            return Err(CheckpointError::PuzzleMismatch {
                expected: definition.id.clone(),
                found: self.state.puzzle_id().clone(),
            });
        }

        match self.state.check_invariants(definition) {
            Validation::Success(_) => Ok(self.state),
            Validation::Failure(violations) => Err(CheckpointError::ValidationFailed(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

/// Encode a session as a checkpoint record.
pub fn encode(state: &SessionState) -> Result<String, CheckpointError> {
    SessionCheckpoint::new(state).to_json()
}

/// Decode and validate a checkpoint record for `definition`.
pub fn decode(raw: &str, definition: &PuzzleDefinition) -> Result<SessionState, CheckpointError> {
    SessionCheckpoint::from_json(raw)?.restore(definition)
}
