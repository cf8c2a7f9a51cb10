//! Core session types and logic.
//!
//! This module contains the pure functional core of the puzzle:
//! - Categories, definitions and their validation
//! - The session state and its pure operations
//! - Guard predicates and the rendering snapshot
//! - Immutable guess history
//!
//! All logic in this module is pure (no I/O). Randomness is passed in
//! explicitly as an `Rng`.

mod category;
mod definition;
pub mod guard;
mod history;
mod session;
mod state;
mod view;

pub use category::{Category, Difficulty, InvalidTier};
pub use definition::{PuzzleDefinition, PuzzleId, CATEGORY_COUNT, GROUP_SIZE, ITEM_COUNT};
pub use guard::Guard;
pub use history::{Guess, GuessHistory};
pub use session::{Outcome, SessionState};
pub use state::{Phase, State};
pub use view::SessionView;
