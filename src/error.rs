//! Crate-level error type.

use crate::builder::BuildError;
use crate::core::PuzzleId;
use crate::rules::DefinitionViolation;
use crate::source::SourceError;
use std::fmt::Display;
use thiserror::Error;

/// Errors surfaced to callers of the session engine.
///
/// Only configuration and supply problems are errors. Corrupt persisted
/// records and failed store writes are logged and absorbed.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The puzzle definition failed structural validation. Fatal: no
    /// session is created.
    #[error("Invalid puzzle definition '{puzzle_id}': {}", describe(.violations))]
    InvalidDefinition {
        puzzle_id: PuzzleId,
        violations: Vec<DefinitionViolation>,
    },

    #[error("Puzzle supply failed: {0}")]
    Source(#[from] SourceError),

    #[error("Engine configuration rejected: {0}")]
    Build(#[from] BuildError),
}

/// Join violations into one line for error messages.
pub(crate) fn describe<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
