//! Violations reported by structural validation.

use crate::core::Difficulty;
use thiserror::Error;

/// Problems found in a puzzle definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionViolation {
    #[error("expected 4 categories, found {found}")]
    WrongCategoryCount { found: usize },

    #[error("category '{label}' has {found} members, expected 4")]
    WrongMemberCount { label: String, found: usize },

    #[error("category at position {index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("item '{item}' appears more than once")]
    DuplicateItem { item: String },

    #[error("expected 16 distinct items, found {found}")]
    WrongItemCount { found: usize },

    #[error("difficulty tier {} is used by more than one category", .difficulty.tier())]
    DuplicateDifficulty { difficulty: Difficulty },
}

/// Problems found in a session state checked against its definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("solved and remaining categories do not partition the puzzle's categories")]
    CategoryMismatch,

    #[error("pool is missing item '{item}'")]
    PoolMissingItem { item: String },

    #[error("pool contains item '{item}' which is not in a remaining category")]
    PoolUnexpectedItem { item: String },

    #[error("pool contains item '{item}' more than once")]
    PoolDuplicateItem { item: String },

    #[error("selected item '{item}' is not in the pool")]
    SelectionNotInPool { item: String },

    #[error("{found} items selected, at most 4 allowed")]
    SelectionTooLarge { found: usize },

    #[error("{revealed} categories revealed but only {solved} solved")]
    RevealedExceedsSolved { revealed: usize, solved: usize },

    #[error("categories were revealed while the session is still in progress")]
    RevealedWhileInProgress,

    #[error("{mistakes} mistakes counted but {recorded} incorrect guesses recorded")]
    MistakesDisagreeWithHistory { mistakes: u32, recorded: usize },

    #[error("{solved} categories solved by the player but {recorded} correct guesses recorded")]
    SolvesDisagreeWithHistory { solved: usize, recorded: usize },
}
