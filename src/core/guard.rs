//! Guard predicates for session actions.
//!
//! Guards are pure boolean functions that say whether an action is worth
//! offering to the player. The session operations never consult them,
//! since every operation is already total; they only drive affordances
//! such as enabling a submit button.

use super::definition::GROUP_SIZE;
use super::session::SessionState;

/// Pure predicate over a value.
///
/// # Example
///
/// ```rust
/// use connections::core::Guard;
///
/// let non_empty = Guard::new(|items: &Vec<String>| !items.is_empty());
///
/// assert!(non_empty.check(&vec!["APPLE".to_string()]));
/// assert!(!non_empty.check(&Vec::new()));
/// ```
pub struct Guard<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be pure (deterministic, no side effects) and
    /// thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the action for this value.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

/// A full selection on an unfinished session.
pub fn can_submit() -> Guard<SessionState> {
    Guard::new(|state: &SessionState| {
        !state.is_finished() && state.selected().len() == GROUP_SIZE
    })
}

pub fn can_deselect() -> Guard<SessionState> {
    Guard::new(|state: &SessionState| !state.selected().is_empty())
}

/// Shuffling fewer than two items cannot change anything.
pub fn can_shuffle() -> Guard<SessionState> {
    Guard::new(|state: &SessionState| state.pool().len() > 1)
}
