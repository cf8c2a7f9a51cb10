//! Guess history tracking.
//!
//! Provides immutable tracking of submitted guesses over time. History
//! never influences matching, but a persisted session must agree with it:
//! one incorrect guess per mistake and one correct guess per solve.

use super::session::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Record of a single submitted guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    /// The items that were submitted
    pub selection: BTreeSet<String>,
    /// Whether the guess matched a category
    pub outcome: Outcome,
    /// Exactly three of the four items shared a single remaining category
    pub one_away: bool,
    /// When the guess was submitted
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of guesses.
///
/// History is immutable - the `record` method returns a new history
/// with the guess added.
///
/// # Example
///
/// ```rust
/// use connections::core::{Guess, GuessHistory, Outcome};
/// use chrono::Utc;
///
/// let history = GuessHistory::new();
/// let guess = Guess {
///     selection: ["A", "B", "C", "D"].into_iter().map(String::from).collect(),
///     outcome: Outcome::Incorrect,
///     one_away: false,
///     timestamp: Utc::now(),
/// };
///
/// let updated = history.record(guess);
/// assert_eq!(updated.guesses().len(), 1);
/// assert_eq!(history.guesses().len(), 0); // Original unchanged
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessHistory {
    guesses: Vec<Guess>,
}

impl GuessHistory {
    pub fn new() -> Self {
        Self {
            guesses: Vec::new(),
        }
    }

    /// Record a guess, returning a new history.
    pub fn record(&self, guess: Guess) -> Self {
        let mut guesses = self.guesses.clone();
        guesses.push(guess);
        Self { guesses }
    }

    /// All guesses in submission order.
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    /// Number of recorded incorrect guesses.
    pub fn mistakes(&self) -> usize {
        self.guesses
            .iter()
            .filter(|guess| guess.outcome == Outcome::Incorrect)
            .count()
    }

    /// Number of recorded correct guesses.
    pub fn solves(&self) -> usize {
        self.guesses
            .iter()
            .filter(|guess| guess.outcome == Outcome::Correct)
            .count()
    }

    /// Whether exactly this set of items was submitted before.
    pub fn already_guessed(&self, selection: &BTreeSet<String>) -> bool {
        self.guesses.iter().any(|guess| &guess.selection == selection)
    }

    /// Time between the first and last guess.
    ///
    /// Returns `None` if there are no guesses.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.guesses.first(), self.guesses.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(items: &[&str], outcome: Outcome) -> Guess {
        Guess {
            selection: items.iter().map(|s| s.to_string()).collect(),
            outcome,
            one_away: false,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = GuessHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.mistakes(), 0);
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = GuessHistory::new();
        let new_history = history.record(guess(&["A", "B", "C", "D"], Outcome::Correct));

        assert_eq!(history.guesses().len(), 0);
        assert_eq!(new_history.guesses().len(), 1);
    }

    #[test]
    fn mistakes_counts_incorrect_guesses() {
        let history = GuessHistory::new()
            .record(guess(&["A", "B", "C", "D"], Outcome::Incorrect))
            .record(guess(&["E", "F", "G", "H"], Outcome::Correct))
            .record(guess(&["A", "B", "C", "E"], Outcome::Incorrect));

        assert_eq!(history.mistakes(), 2);
        assert_eq!(history.solves(), 1);
    }

    #[test]
    fn already_guessed_ignores_order() {
        let history =
            GuessHistory::new().record(guess(&["A", "B", "C", "D"], Outcome::Incorrect));

        let same: BTreeSet<String> = ["D", "C", "B", "A"].iter().map(|s| s.to_string()).collect();
        let other: BTreeSet<String> = ["D", "C", "B", "E"].iter().map(|s| s.to_string()).collect();

        assert!(history.already_guessed(&same));
        assert!(!history.already_guessed(&other));
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history =
            GuessHistory::new().record(guess(&["A", "B", "C", "D"], Outcome::Incorrect));

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(guess(&["E", "F", "G", "H"], Outcome::Correct));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn history_serializes_correctly() {
        let history =
            GuessHistory::new().record(guess(&["A", "B", "C", "D"], Outcome::Incorrect));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: GuessHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
