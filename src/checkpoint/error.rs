//! Checkpoint error types.

use crate::core::PuzzleId;
use crate::error::describe;
use crate::rules::InvariantViolation;
use thiserror::Error;

/// Errors that can occur while encoding or restoring a session checkpoint.
///
/// A persisted record that fails to restore is treated as corrupt: the
/// engine logs it and starts a fresh session instead.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint was written for a different puzzle
    #[error("Checkpoint belongs to puzzle '{found}', expected '{expected}'")]
    PuzzleMismatch { expected: PuzzleId, found: PuzzleId },

    /// Restored state violates the session invariants
    #[error("Checkpoint validation failed: {}", describe(.0))]
    ValidationFailed(Vec<InvariantViolation>),
}
