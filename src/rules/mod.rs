//! Session rules and validation violations.
//!
//! Structural checks use Stillwater's `Validation` type so that every
//! problem in a definition or persisted state is reported in one pass,
//! not just the first one found.

pub mod mistakes;
pub mod violations;

pub use mistakes::{MistakeLimit, SessionRules};
pub use violations::{DefinitionViolation, InvariantViolation};

use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Turn a boolean check into a `Validation`, building the violation lazily.
pub(crate) fn require<V>(ok: bool, violation: impl FnOnce() -> V) -> Validation<(), NonEmptyVec<V>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}
