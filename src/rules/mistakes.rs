//! Mistake limit and session rules.

use serde::{Deserialize, Serialize};

/// How many incorrect submissions a session tolerates.
///
/// # Example
///
/// ```rust
/// use connections::rules::MistakeLimit;
///
/// assert!(!MistakeLimit::Unlimited.is_exhausted(100));
/// assert!(MistakeLimit::Limited(4).is_exhausted(4));
/// assert_eq!(MistakeLimit::Limited(4).remaining(1), Some(3));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeLimit {
    /// Mistakes are counted but never end the session.
    #[default]
    Unlimited,

    /// Reaching this many mistakes reveals every remaining category.
    Limited(u32),
}

impl MistakeLimit {
    /// Check whether `mistakes` has reached the limit (pure)
    pub fn is_exhausted(&self, mistakes: u32) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Limited(max) => mistakes >= *max,
        }
    }

    /// Mistakes left before the limit, `None` when unlimited
    pub fn remaining(&self, mistakes: u32) -> Option<u32> {
        match self {
            Self::Unlimited => None,
            Self::Limited(max) => Some(max.saturating_sub(mistakes)),
        }
    }
}

/// Rules applied by the pure session operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRules {
    #[serde(default)]
    pub mistake_limit: MistakeLimit,
}

impl SessionRules {
    pub fn with_mistake_limit(limit: MistakeLimit) -> Self {
        Self {
            mistake_limit: limit,
        }
    }
}
