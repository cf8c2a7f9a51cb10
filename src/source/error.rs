//! Puzzle supply error types.

use crate::core::PuzzleId;
use std::io;
use thiserror::Error;

/// Errors that can occur while fetching a puzzle definition
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Puzzle '{0}' not found")]
    NotFound(PuzzleId),

    #[error("Puzzle id '{0}' cannot name a puzzle file")]
    InvalidId(PuzzleId),

    #[error("Failed to read puzzle '{id}': {source}")]
    Io {
        id: PuzzleId,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse puzzle '{id}': {message}")]
    Parse { id: PuzzleId, message: String },
}
