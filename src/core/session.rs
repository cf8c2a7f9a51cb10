//! Puzzle session state and its pure operations.
//!
//! Every operation takes `&self` and returns a new snapshot, leaving the
//! original untouched. Operations are total: given a state that satisfies
//! the invariants they always produce another one that does, and inputs
//! that make no sense (unknown items, a fifth selection, moves after the
//! end) are absorbed as no-ops.

use super::category::Category;
use super::definition::{PuzzleDefinition, PuzzleId, GROUP_SIZE};
use super::history::{Guess, GuessHistory};
use super::state::Phase;
use crate::error::SessionError;
use crate::rules::{require, InvariantViolation, SessionRules};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The selection was exactly one remaining category
    Correct,
    /// Anything else, including a selection of the wrong size
    Incorrect,
    /// The session was already finished; nothing changed
    Ignored,
}

/// Mutable-by-replacement state of one player's session.
///
/// This is the unit of persistence. The phase is derived: the session is
/// finished once no category remains.
///
/// # Example
///
/// ```rust
/// use connections::core::{Outcome, SessionState};
/// use connections::rules::SessionRules;
/// use connections::puzzle;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use chrono::Utc;
///
/// let definition = puzzle! {
///     id: "2024-01-10";
///     "Fruits" => Straightforward ["APPLE", "PEAR", "PLUM", "FIG"],
///     "Colors" => Moderate ["RED", "BLUE", "GREEN", "GRAPE"],
///     "Planets" => Hard ["MARS", "VENUS", "EARTH", "SATURN"],
///     "Metals" => Tricky ["IRON", "GOLD", "TIN", "LEAD"],
/// };
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let state = SessionState::fresh(&definition, &mut rng).unwrap();
///
/// let state = ["APPLE", "PEAR", "PLUM", "FIG"]
///     .iter()
///     .fold(state, |state, item| state.toggle_select(item));
/// let (state, outcome) = state.submit(&SessionRules::default(), Utc::now());
///
/// assert_eq!(outcome, Outcome::Correct);
/// assert_eq!(state.solved().len(), 1);
/// assert_eq!(state.pool().len(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    puzzle_id: PuzzleId,
    solved: Vec<Category>,
    remaining: Vec<Category>,
    pool: Vec<String>,
    selected: BTreeSet<String>,
    mistakes: u32,
    #[serde(default)]
    revealed: usize,
    #[serde(default)]
    history: GuessHistory,
}

impl SessionState {
    /// Start a new session: nothing solved, all 16 items in random order.
    ///
    /// Fails with [`SessionError::InvalidDefinition`] before any state is
    /// created if the definition is structurally invalid.
    pub fn fresh<R: Rng + ?Sized>(
        definition: &PuzzleDefinition,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        definition.ensure_valid()?;

        let mut pool: Vec<String> = definition.items().map(String::from).collect();
        pool.shuffle(rng);

        Ok(Self {
            puzzle_id: definition.id.clone(),
            solved: Vec::new(),
            remaining: definition.categories.clone(),
            pool,
            selected: BTreeSet::new(),
            mistakes: 0,
            revealed: 0,
            history: GuessHistory::new(),
        })
    }

    pub fn puzzle_id(&self) -> &PuzzleId {
        &self.puzzle_id
    }

    /// Categories solved so far, in the order they were solved.
    pub fn solved(&self) -> &[Category] {
        &self.solved
    }

    pub fn remaining(&self) -> &[Category] {
        &self.remaining
    }

    /// Unsolved items in display order.
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, item: &str) -> bool {
        self.selected.contains(item)
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Categories moved to `solved` by an exhausted mistake limit rather
    /// than by the player. Always the tail of `solved`.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn history(&self) -> &GuessHistory {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        if self.remaining.is_empty() {
            Phase::Finished
        } else {
            Phase::InProgress
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Select `item`, or deselect it if already selected.
    ///
    /// Items not in the pool are ignored, and so is a fifth selection.
    pub fn toggle_select(&self, item: &str) -> Self {
        if !self.pool.iter().any(|candidate| candidate == item) {
            return self.clone();
        }

        let mut next = self.clone();
        if !next.selected.remove(item) && next.selected.len() < GROUP_SIZE {
            next.selected.insert(item.to_string());
        }
        next
    }

    pub fn deselect_all(&self) -> Self {
        let mut next = self.clone();
        next.selected.clear();
        next
    }

    /// New uniformly random display order of the same pool.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut next = self.clone();
        next.pool.shuffle(rng);
        next
    }

    /// Submit the current selection.
    ///
    /// An exact match moves the category to the end of `solved` and drops
    /// its items from the pool while keeping the order of the rest. Any
    /// other selection, including one of the wrong size, counts as a
    /// mistake. The selection is cleared either way. A finished session
    /// ignores submissions.
    ///
    /// `now` is the timestamp recorded in the guess history.
    pub fn submit(&self, rules: &SessionRules, now: DateTime<Utc>) -> (Self, Outcome) {
        if self.is_finished() {
            return (self.clone(), Outcome::Ignored);
        }

        let found = if self.selected.len() == GROUP_SIZE {
            self.remaining
                .iter()
                .position(|category| category.matches(&self.selected))
        } else {
            None
        };

        let mut next = self.clone();
        next.selected.clear();

        match found {
            Some(index) => {
                let category = next.remaining.remove(index);
                next.pool.retain(|item| !category.contains(item));
                next.solved.push(category);
                next.history = next.history.record(self.guess(Outcome::Correct, false, now));
                (next, Outcome::Correct)
            }
            None => {
                let one_away = self.selected.len() == GROUP_SIZE
                    && self
                        .remaining
                        .iter()
                        .any(|category| category.overlap(&self.selected) == GROUP_SIZE - 1);

                next.mistakes = self.mistakes.saturating_add(1);
                next.history = next.history.record(self.guess(Outcome::Incorrect, one_away, now));

                if rules.mistake_limit.is_exhausted(next.mistakes) {
                    next = next.reveal_remaining();
                }
                (next, Outcome::Incorrect)
            }
        }
    }

    /// Apply the mistake limit to a session that may have been played
    /// under different rules: an unfinished session whose mistakes already
    /// exhaust the limit has its remaining categories revealed.
    pub fn enforce_limit(&self, rules: &SessionRules) -> Self {
        if !self.is_finished() && rules.mistake_limit.is_exhausted(self.mistakes) {
            self.clone().reveal_remaining()
        } else {
            self.clone()
        }
    }

    /// Check every structural invariant against the definition this state
    /// belongs to, accumulating ALL violations.
    pub fn check_invariants(
        &self,
        definition: &PuzzleDefinition,
    ) -> Validation<(), NonEmptyVec<InvariantViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<InvariantViolation>>> = Vec::new();

        let known: Vec<&Category> = self.solved.iter().chain(self.remaining.iter()).collect();
        let partitioned = known.len() == definition.categories.len()
            && definition.categories.iter().all(|category| {
                known.iter().filter(|candidate| **candidate == category).count() == 1
            });
        checks.push(require(partitioned, || InvariantViolation::CategoryMismatch));

        let expected: HashSet<&str> = self
            .remaining
            .iter()
            .flat_map(|category| category.members.iter().map(String::as_str))
            .collect();
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for item in &self.pool {
            *occurrences.entry(item.as_str()).or_default() += 1;
        }

        for item in &expected {
            checks.push(require(occurrences.contains_key(item), || {
                InvariantViolation::PoolMissingItem {
                    item: item.to_string(),
                }
            }));
        }
        for (item, count) in &occurrences {
            checks.push(require(expected.contains(item), || {
                InvariantViolation::PoolUnexpectedItem {
                    item: item.to_string(),
                }
            }));
            checks.push(require(*count == 1, || InvariantViolation::PoolDuplicateItem {
                item: item.to_string(),
            }));
        }

        checks.push(require(self.selected.len() <= GROUP_SIZE, || {
            InvariantViolation::SelectionTooLarge {
                found: self.selected.len(),
            }
        }));
        for item in &self.selected {
            checks.push(require(occurrences.contains_key(item.as_str()), || {
                InvariantViolation::SelectionNotInPool { item: item.clone() }
            }));
        }

        checks.push(require(self.revealed <= self.solved.len(), || {
            InvariantViolation::RevealedExceedsSolved {
                revealed: self.revealed,
                solved: self.solved.len(),
            }
        }));
        checks.push(require(self.revealed == 0 || self.remaining.is_empty(), || {
            InvariantViolation::RevealedWhileInProgress
        }));

        let recorded = self.history.mistakes();
        checks.push(require(recorded == self.mistakes as usize, || {
            InvariantViolation::MistakesDisagreeWithHistory {
                mistakes: self.mistakes,
                recorded,
            }
        }));
        let player_solved = self.solved.len().saturating_sub(self.revealed);
        let recorded = self.history.solves();
        checks.push(require(recorded == player_solved, || {
            InvariantViolation::SolvesDisagreeWithHistory {
                solved: player_solved,
                recorded,
            }
        }));

        Validation::all_vec(checks).map(|_| ())
    }

    fn guess(&self, outcome: Outcome, one_away: bool, now: DateTime<Utc>) -> Guess {
        Guess {
            selection: self.selected.clone(),
            outcome,
            one_away,
            timestamp: now,
        }
    }

    fn reveal_remaining(mut self) -> Self {
        let revealed = std::mem::take(&mut self.remaining);
        self.revealed = revealed.len();
        self.solved.extend(revealed);
        self.pool.clear();
        self.selected.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle;
    use crate::rules::MistakeLimit;
    use rand::rngs::StdRng;
    use chrono::TimeZone;
    use rand::SeedableRng;

    fn definition() -> PuzzleDefinition {
        puzzle! {
            id: "2024-01-10";
            "Fruits" => Straightforward ["APPLE", "PEAR", "PLUM", "FIG"],
            "Colors" => Moderate ["RED", "BLUE", "GREEN", "GRAPE"],
            "Planets" => Hard ["MARS", "VENUS", "EARTH", "SATURN"],
            "Metals" => Tricky ["IRON", "GOLD", "TIN", "LEAD"],
        }
    }

    fn fresh() -> SessionState {
        let mut rng = StdRng::seed_from_u64(42);
        SessionState::fresh(&definition(), &mut rng).unwrap()
    }

    fn select(state: SessionState, items: &[&str]) -> SessionState {
        items
            .iter()
            .fold(state, |state, item| state.toggle_select(item))
    }

    fn at() -> DateTime<Utc> {
        Utc.timestamp_opt(1_704_888_000, 0).unwrap()
    }

    fn assert_valid(state: &SessionState) {
        assert!(state.check_invariants(&definition()).is_success());
    }

    #[test]
    fn fresh_session_starts_empty() {
        let state = fresh();

        assert!(state.solved().is_empty());
        assert_eq!(state.remaining().len(), 4);
        assert!(state.selected().is_empty());
        assert_eq!(state.mistakes(), 0);
        assert_eq!(state.phase(), Phase::InProgress);

        let definition = definition();
        let pool: BTreeSet<&str> = state.pool().iter().map(String::as_str).collect();
        let all: BTreeSet<&str> = definition.items().collect();
        assert_eq!(pool, all);
        assert_eq!(state.pool().len(), 16);
        assert_valid(&state);
    }

    #[test]
    fn fresh_rejects_invalid_definition() {
        let mut broken = definition();
        broken.categories.truncate(2);

        let mut rng = StdRng::seed_from_u64(1);
        let result = SessionState::fresh(&broken, &mut rng);
        assert!(matches!(result, Err(SessionError::InvalidDefinition { .. })));
    }

    #[test]
    fn toggle_selects_and_deselects() {
        let state = fresh();
        let selected = state.toggle_select("APPLE");
        assert!(selected.is_selected("APPLE"));

        let deselected = selected.toggle_select("APPLE");
        assert_eq!(deselected, state);
    }

    #[test]
    fn toggle_ignores_unknown_items() {
        let state = fresh();
        assert_eq!(state.toggle_select("PLUTO"), state);
    }

    #[test]
    fn toggle_is_capped_at_four() {
        let state = select(fresh(), &["APPLE", "PEAR", "PLUM", "FIG"]);
        let after = state.toggle_select("RED");

        assert_eq!(after.selected(), state.selected());
        assert!(!after.is_selected("RED"));
    }

    #[test]
    fn toggle_is_pure() {
        let state = fresh();
        let _ = state.toggle_select("APPLE");
        assert!(state.selected().is_empty());
    }

    #[test]
    fn deselect_all_clears_selection() {
        let state = select(fresh(), &["APPLE", "RED"]);
        let cleared = state.deselect_all();

        assert!(cleared.selected().is_empty());
        assert_eq!(cleared.pool(), state.pool());
    }

    #[test]
    fn shuffle_preserves_truth() {
        let state = select(fresh(), &["APPLE", "RED"]);
        let mut rng = StdRng::seed_from_u64(9);
        let shuffled = state.shuffled(&mut rng);

        assert_eq!(shuffled.solved(), state.solved());
        assert_eq!(shuffled.remaining(), state.remaining());
        assert_eq!(shuffled.selected(), state.selected());
        assert_eq!(shuffled.mistakes(), state.mistakes());

        let before: BTreeSet<&String> = state.pool().iter().collect();
        let after: BTreeSet<&String> = shuffled.pool().iter().collect();
        assert_eq!(before, after);
        assert_valid(&shuffled);
    }

    #[test]
    fn correct_submission_solves_category() {
        let state = select(fresh(), &["APPLE", "PEAR", "PLUM", "FIG"]);
        let (next, outcome) = state.submit(&SessionRules::default(), at());

        assert_eq!(outcome, Outcome::Correct);
        assert_eq!(next.solved().len(), 1);
        assert_eq!(next.solved()[0].label, "Fruits");
        assert!(next.remaining().iter().all(|c| c.label != "Fruits"));
        assert!(next.selected().is_empty());
        assert_eq!(next.mistakes(), 0);

        let expected: Vec<&String> = state
            .pool()
            .iter()
            .filter(|item| !["APPLE", "PEAR", "PLUM", "FIG"].contains(&item.as_str()))
            .collect();
        let actual: Vec<&String> = next.pool().iter().collect();
        assert_eq!(actual, expected);
        assert_valid(&next);
    }

    #[test]
    fn incorrect_submission_counts_mistake() {
        let state = select(fresh(), &["APPLE", "PEAR", "PLUM", "GRAPE"]);
        let (next, outcome) = state.submit(&SessionRules::default(), at());

        assert_eq!(outcome, Outcome::Incorrect);
        assert_eq!(next.mistakes(), 1);
        assert_eq!(next.solved(), state.solved());
        assert_eq!(next.remaining(), state.remaining());
        assert_eq!(next.pool(), state.pool());
        assert!(next.selected().is_empty());
    }

    #[test]
    fn incorrect_submission_detects_one_away() {
        let state = select(fresh(), &["APPLE", "PEAR", "PLUM", "GRAPE"]);
        let (next, _) = state.submit(&SessionRules::default(), at());
        assert!(next.history().guesses()[0].one_away);

        let state = select(fresh(), &["APPLE", "PEAR", "RED", "BLUE"]);
        let (next, _) = state.submit(&SessionRules::default(), at());
        assert!(!next.history().guesses()[0].one_away);
    }

    #[test]
    fn partial_selection_is_a_mistake() {
        let state = select(fresh(), &["APPLE", "PEAR"]);
        let (next, outcome) = state.submit(&SessionRules::default(), at());

        assert_eq!(outcome, Outcome::Incorrect);
        assert_eq!(next.mistakes(), 1);
        assert!(next.selected().is_empty());
    }

    #[test]
    fn solving_everything_finishes_session() {
        let rules = SessionRules::default();
        let mut state = fresh();
        for category in definition().categories {
            let members: Vec<&str> = category.members.iter().map(String::as_str).collect();
            let (next, outcome) = select(state, &members).submit(&rules, at());
            assert_eq!(outcome, Outcome::Correct);
            state = next;
        }

        assert_eq!(state.phase(), Phase::Finished);
        assert!(state.pool().is_empty());
        assert_eq!(state.revealed(), 0);
        let labels: Vec<&str> = state.solved().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Fruits", "Colors", "Planets", "Metals"]);

        let (after, outcome) = state.submit(&rules, at());
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(after, state);
        assert_valid(&after);
    }

    #[test]
    fn exhausted_mistake_limit_reveals_remaining() {
        let rules = SessionRules::with_mistake_limit(MistakeLimit::Limited(2));
        let state = select(fresh(), &["APPLE", "PEAR", "PLUM", "FIG"]);
        let (state, _) = state.submit(&rules, at());

        let (state, _) = select(state, &["RED", "MARS"]).submit(&rules, at());
        assert_eq!(state.phase(), Phase::InProgress);

        let (state, outcome) = select(state, &["RED", "MARS"]).submit(&rules, at());
        assert_eq!(outcome, Outcome::Incorrect);
        assert_eq!(state.mistakes(), 2);
        assert_eq!(state.phase(), Phase::Finished);
        assert_eq!(state.solved().len(), 4);
        assert_eq!(state.revealed(), 3);
        assert!(state.pool().is_empty());
        assert!(state.selected().is_empty());
        assert_valid(&state);
    }

    #[test]
    fn unlimited_mistakes_never_finish_session() {
        let rules = SessionRules::default();
        let mut state = fresh();
        for _ in 0..50 {
            state = state.submit(&rules, at()).0;
        }
        assert_eq!(state.mistakes(), 50);
        assert_eq!(state.phase(), Phase::InProgress);
    }

    #[test]
    fn invariants_catch_foreign_pool_item() {
        let mut state = fresh();
        state.pool.push("PLUTO".to_string());

        match state.check_invariants(&definition()) {
            Validation::Failure(errors) => assert!(errors.iter().any(|e| matches!(
                e,
                InvariantViolation::PoolUnexpectedItem { item } if item == "PLUTO"
            ))),
            Validation::Success(_) => panic!("Expected failure"),
        }
    }

    #[test]
    fn invariants_catch_category_mismatch() {
        let mut state = fresh();
        state.remaining.pop();

        match state.check_invariants(&definition()) {
            Validation::Failure(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, InvariantViolation::CategoryMismatch)));
                // The metals are still in the pool but no longer remaining
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, InvariantViolation::PoolUnexpectedItem { .. })));
            }
            Validation::Success(_) => panic!("Expected failure"),
        }
    }

    #[test]
    fn invariants_catch_stray_selection() {
        let mut state = fresh();
        state.selected.insert("PLUTO".to_string());
        assert!(state.check_invariants(&definition()).is_failure());
    }

    #[test]
    fn submit_is_deterministic_for_a_given_time() {
        let rules = SessionRules::default();
        let state = select(fresh(), &["APPLE", "PEAR", "PLUM", "GRAPE"]);

        let (first, _) = state.submit(&rules, at());
        let (second, _) = state.submit(&rules, at());

        assert_eq!(first, second);
        assert_eq!(first.history().guesses()[0].timestamp, at());
    }

    #[test]
    fn invariants_catch_mistakes_missing_from_history() {
        let (mut state, _) = fresh().submit(&SessionRules::default(), at());
        state.mistakes = 0;

        match state.check_invariants(&definition()) {
            Validation::Failure(errors) => assert!(errors.iter().any(|e| matches!(
                e,
                InvariantViolation::MistakesDisagreeWithHistory { mistakes: 0, recorded: 1 }
            ))),
            Validation::Success(_) => panic!("Expected failure"),
        }
    }

    #[test]
    fn invariants_count_only_player_solves() {
        let rules = SessionRules::with_mistake_limit(MistakeLimit::Limited(1));
        let state = select(fresh(), &["APPLE", "PEAR", "PLUM", "FIG"]);
        let (state, _) = state.submit(&rules, at());
        let (state, _) = state.submit(&rules, at());
        assert_eq!(state.revealed(), 3);
        assert_valid(&state);

        let mut forged = state.clone();
        forged.revealed = 1;
        assert!(forged.check_invariants(&definition()).is_failure());
    }

    #[test]
    fn enforce_limit_reveals_exhausted_session() {
        let mut state = fresh();
        for _ in 0..3 {
            state = state.submit(&SessionRules::default(), at()).0;
        }

        let lenient = SessionRules::with_mistake_limit(MistakeLimit::Limited(4));
        assert_eq!(state.enforce_limit(&lenient), state);

        let strict = SessionRules::with_mistake_limit(MistakeLimit::Limited(3));
        let enforced = state.enforce_limit(&strict);
        assert_eq!(enforced.phase(), Phase::Finished);
        assert_eq!(enforced.revealed(), 4);
        assert_eq!(enforced.mistakes(), 3);
        assert_valid(&enforced);
    }
}
