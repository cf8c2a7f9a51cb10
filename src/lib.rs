//! Connections: a pure functional session engine for word grouping puzzles
//!
//! A puzzle hides four categories of four items each. The player selects
//! four items from a shuffled pool and submits them; an exact match
//! reveals the category for good, anything else counts as a mistake.
//!
//! The crate follows a "pure core, imperative shell" layout. The core
//! session logic is composed of pure functions over immutable snapshots,
//! while persistence and puzzle supply live in the shell.
//!
//! # Core Concepts
//!
//! - **Definition**: Four validated categories under a stable puzzle id
//! - **Session**: Immutable snapshot of progress, transformed by pure operations
//! - **Engine**: Applies operations and persists every resulting snapshot
//! - **View**: What a renderer needs after each operation
//!
//! # Example
//!
//! ```rust
//! use connections::builder::EngineBuilder;
//! use connections::checkpoint::MemoryStore;
//! use connections::core::{Outcome, Phase};
//! use connections::puzzle;
//!
//! let definition = puzzle! {
//!     id: "2024-01-10";
//!     "Fruits" => Straightforward ["APPLE", "PEAR", "PLUM", "FIG"],
//!     "Colors" => Moderate ["RED", "BLUE", "GREEN", "GRAPE"],
//!     "Planets" => Hard ["MARS", "VENUS", "EARTH", "SATURN"],
//!     "Metals" => Tricky ["IRON", "GOLD", "TIN", "LEAD"],
//! };
//!
//! let mut engine = EngineBuilder::new()
//!     .store(MemoryStore::new())
//!     .build()
//!     .unwrap();
//!
//! let mut state = engine.load(&definition).unwrap();
//! for item in ["APPLE", "PEAR", "PLUM", "FIG"] {
//!     state = engine.toggle_select(&state, item);
//! }
//!
//! let (state, outcome) = engine.submit(&state);
//! assert_eq!(outcome, Outcome::Correct);
//!
//! let view = engine.view(&state);
//! assert_eq!(view.solved[0].label, "Fruits");
//! assert_eq!(view.pool.len(), 12);
//! assert_eq!(view.phase, Phase::InProgress);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod source;

// Re-export commonly used types
pub use builder::{EngineBuilder, EngineConfig};
pub use crate::core::{
    Category, Difficulty, Outcome, Phase, PuzzleDefinition, PuzzleId, SessionState, SessionView,
};
pub use effects::{open_session, SessionEngine, SessionEnv};
pub use error::SessionError;
