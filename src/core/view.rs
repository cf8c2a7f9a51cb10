//! Snapshot handed to the presentation layer after every operation.

use super::category::Category;
use super::definition::PuzzleId;
use super::guard::{can_deselect, can_shuffle, can_submit};
use super::session::SessionState;
use super::state::Phase;
use crate::rules::SessionRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything a renderer needs to draw the board.
///
/// Colors, row chunking and buttons are the renderer's business; the
/// `can_*` flags only say which actions would have an effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub puzzle_id: PuzzleId,
    pub solved: Vec<Category>,
    pub pool: Vec<String>,
    pub selected: BTreeSet<String>,
    pub mistakes: u32,
    /// `None` when mistakes are unlimited
    pub mistakes_remaining: Option<u32>,
    pub revealed: usize,
    pub phase: Phase,
    pub can_submit: bool,
    pub can_deselect: bool,
    pub can_shuffle: bool,
}

impl SessionView {
    pub fn new(state: &SessionState, rules: &SessionRules) -> Self {
        Self {
            puzzle_id: state.puzzle_id().clone(),
            solved: state.solved().to_vec(),
            pool: state.pool().to_vec(),
            selected: state.selected().clone(),
            mistakes: state.mistakes(),
            mistakes_remaining: rules.mistake_limit.remaining(state.mistakes()),
            revealed: state.revealed(),
            phase: state.phase(),
            can_submit: can_submit().check(state),
            can_deselect: can_deselect().check(state),
            can_shuffle: can_shuffle().check(state),
        }
    }
}
