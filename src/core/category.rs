//! Categories: the four hidden groups of a puzzle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Difficulty tier of a category, ordinal 1 (easiest) to 4 (hardest).
///
/// Serialized as the bare tier number. The tier only drives presentation;
/// matching never looks at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Straightforward = 1,
    Moderate = 2,
    Hard = 3,
    Tricky = 4,
}

/// A tier number outside 1-4.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("difficulty tier must be between 1 and 4, got {0}")]
pub struct InvalidTier(pub u8);

impl Difficulty {
    /// Every tier, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Straightforward,
        Difficulty::Moderate,
        Difficulty::Hard,
        Difficulty::Tricky,
    ];

    pub fn tier(self) -> u8 {
        self as u8
    }

    pub fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Self::Straightforward),
            2 => Some(Self::Moderate),
            3 => Some(Self::Hard),
            4 => Some(Self::Tricky),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = InvalidTier;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        Self::from_tier(tier).ok_or(InvalidTier(tier))
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.tier()
    }
}

/// One hidden group: a label, four member items and a difficulty tier.
///
/// # Example
///
/// ```rust
/// use connections::core::{Category, Difficulty};
/// use std::collections::BTreeSet;
///
/// let fruits = Category::new(
///     "Fruits",
///     Difficulty::Straightforward,
///     ["APPLE", "PEAR", "PLUM", "FIG"],
/// );
///
/// let guess: BTreeSet<String> = ["FIG", "PLUM", "PEAR", "APPLE"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// assert!(fruits.matches(&guess));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Display name of the group's theme
    pub label: String,
    /// The four member items, in authored order
    pub members: Vec<String>,
    /// Presentation tier
    pub difficulty: Difficulty,
}

impl Category {
    pub fn new<I, T>(label: impl Into<String>, difficulty: Difficulty, members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            label: label.into(),
            members: members.into_iter().map(Into::into).collect(),
            difficulty,
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.members.iter().any(|member| member == item)
    }

    /// Exact set equality between `selection` and the members.
    ///
    /// Members are sorted and compared against the (already ordered)
    /// selection, so construction order never matters. Subsets and
    /// supersets do not match.
    pub fn matches(&self, selection: &BTreeSet<String>) -> bool {
        let mut members: Vec<&str> = self.members.iter().map(String::as_str).collect();
        members.sort_unstable();
        members.dedup();

        members.len() == selection.len()
            && members
                .iter()
                .zip(selection.iter())
                .all(|(member, selected)| *member == selected.as_str())
    }

    /// Number of selected items that belong to this category.
    pub fn overlap(&self, selection: &BTreeSet<String>) -> usize {
        selection.iter().filter(|item| self.contains(item)).count()
    }
}
