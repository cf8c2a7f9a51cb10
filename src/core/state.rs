//! Core State trait and the session phase.
//!
//! A session is either still being played or finished. The phase is
//! derived from the session state, never stored on its own.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for snapshots
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for persistence
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Phase of a puzzle session.
///
/// # Example
///
/// ```rust
/// use connections::core::{Phase, State};
///
/// assert!(!Phase::InProgress.is_final());
/// assert!(Phase::Finished.is_final());
/// assert_eq!(Phase::Finished.name(), "Finished");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// At least one category is still unsolved.
    InProgress,
    /// Every category has been solved or revealed.
    Finished,
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::InProgress => "InProgress",
            Self::Finished => "Finished",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Finished)
    }
}
