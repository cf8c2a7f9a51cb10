//! Puzzle definitions and their structural validation.

use super::category::{Category, Difficulty};
use crate::error::SessionError;
use crate::rules::{require, DefinitionViolation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Number of categories in every puzzle
pub const CATEGORY_COUNT: usize = 4;

/// Number of members in every category, and the size of a full selection
pub const GROUP_SIZE: usize = 4;

/// Number of distinct items in every puzzle
pub const ITEM_COUNT: usize = CATEGORY_COUNT * GROUP_SIZE;

/// Stable puzzle identifier, e.g. a date such as `2024-01-10`.
///
/// Used as the namespace of the persisted session record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleId(String);

impl PuzzleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PuzzleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PuzzleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Immutable input to a session: an id and four categories.
///
/// Definitions are not trusted on construction; call
/// [`PuzzleDefinition::validate`] or [`PuzzleDefinition::ensure_valid`]
/// before building a session from one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    pub id: PuzzleId,
    pub categories: Vec<Category>,
}

impl PuzzleDefinition {
    pub fn new(id: impl Into<PuzzleId>, categories: Vec<Category>) -> Self {
        Self {
            id: id.into(),
            categories,
        }
    }

    /// Every item across all categories, in category then member order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|category| category.members.iter().map(String::as_str))
    }

    /// The category an item belongs to, if any.
    pub fn category_of(&self, item: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.contains(item))
    }

    /// Check the definition's structure, accumulating ALL violations.
    ///
    /// # Example
    ///
    /// ```rust
    /// use connections::core::{Category, Difficulty, PuzzleDefinition};
    ///
    /// let definition = PuzzleDefinition::new(
    ///     "broken",
    ///     vec![Category::new("Solo", Difficulty::Hard, ["A", "B", "C", "D"])],
    /// );
    ///
    /// assert!(definition.validate().is_failure());
    /// ```
    pub fn validate(&self) -> Validation<(), NonEmptyVec<DefinitionViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<DefinitionViolation>>> = Vec::new();

        checks.push(require(self.categories.len() == CATEGORY_COUNT, || {
            DefinitionViolation::WrongCategoryCount {
                found: self.categories.len(),
            }
        }));

        for (index, category) in self.categories.iter().enumerate() {
            checks.push(require(!category.label.trim().is_empty(), || {
                DefinitionViolation::EmptyLabel { index }
            }));
            checks.push(require(category.members.len() == GROUP_SIZE, || {
                DefinitionViolation::WrongMemberCount {
                    label: category.label.clone(),
                    found: category.members.len(),
                }
            }));
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for item in self.items() {
            if !seen.insert(item) && reported.insert(item) {
                checks.push(Validation::fail(DefinitionViolation::DuplicateItem {
                    item: item.to_string(),
                }));
            }
        }
        checks.push(require(seen.len() == ITEM_COUNT, || {
            DefinitionViolation::WrongItemCount { found: seen.len() }
        }));

        for difficulty in Difficulty::ALL {
            let uses = self
                .categories
                .iter()
                .filter(|category| category.difficulty == difficulty)
                .count();
            checks.push(require(uses <= 1, || {
                DefinitionViolation::DuplicateDifficulty { difficulty }
            }));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and convert failures into [`SessionError::InvalidDefinition`].
    pub fn ensure_valid(&self) -> Result<(), SessionError> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(SessionError::InvalidDefinition {
                puzzle_id: self.id.clone(),
                violations: violations.iter().cloned().collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle;

    fn valid() -> PuzzleDefinition {
        puzzle! {
            id: "2024-01-10";
            "Fruits" => Straightforward ["APPLE", "PEAR", "PLUM", "FIG"],
            "Colors" => Moderate ["RED", "BLUE", "GREEN", "GRAPE"],
            "Planets" => Hard ["MARS", "VENUS", "EARTH", "SATURN"],
            "Metals" => Tricky ["IRON", "GOLD", "TIN", "LEAD"],
        }
    }

    fn violations(definition: &PuzzleDefinition) -> Vec<DefinitionViolation> {
        match definition.validate() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    #[test]
    fn valid_definition_passes() {
        assert!(valid().validate().is_success());
        assert!(valid().ensure_valid().is_ok());
    }

    #[test]
    fn wrong_category_count_is_reported() {
        let mut definition = valid();
        definition.categories.pop();

        let found = violations(&definition);
        assert!(found.contains(&DefinitionViolation::WrongCategoryCount { found: 3 }));
        assert!(found.contains(&DefinitionViolation::WrongItemCount { found: 12 }));
    }

    #[test]
    fn duplicate_item_is_reported_once() {
        let mut definition = valid();
        definition.categories[1].members[0] = "APPLE".to_string();

        let found = violations(&definition);
        let duplicates = found
            .iter()
            .filter(|v| matches!(v, DefinitionViolation::DuplicateItem { .. }))
            .count();
        assert_eq!(duplicates, 1);
        assert!(found.contains(&DefinitionViolation::WrongItemCount { found: 15 }));
    }

    #[test]
    fn duplicate_difficulty_is_reported() {
        let mut definition = valid();
        definition.categories[3].difficulty = Difficulty::Straightforward;

        let found = violations(&definition);
        assert_eq!(
            found,
            vec![DefinitionViolation::DuplicateDifficulty {
                difficulty: Difficulty::Straightforward
            }]
        );
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let mut definition = valid();
        definition.categories[0].label = "  ".to_string();
        definition.categories[2].members.push("PLUTO".to_string());
        definition.categories[3].difficulty = Difficulty::Hard;

        let found = violations(&definition);
        assert!(found.contains(&DefinitionViolation::EmptyLabel { index: 0 }));
        assert!(found.contains(&DefinitionViolation::WrongMemberCount {
            label: "Planets".to_string(),
            found: 5
        }));
        assert!(found.contains(&DefinitionViolation::WrongItemCount { found: 17 }));
        assert!(found.contains(&DefinitionViolation::DuplicateDifficulty {
            difficulty: Difficulty::Hard
        }));
    }

    #[test]
    fn ensure_valid_returns_invalid_definition() {
        let mut definition = valid();
        definition.categories.clear();

        match definition.ensure_valid() {
            Err(SessionError::InvalidDefinition {
                puzzle_id,
                violations,
            }) => {
                assert_eq!(puzzle_id.as_str(), "2024-01-10");
                assert!(!violations.is_empty());
            }
            other => panic!("Expected InvalidDefinition, got {other:?}"),
        }
    }

    #[test]
    fn category_of_finds_owner() {
        let definition = valid();
        assert_eq!(
            definition.category_of("GRAPE").map(|c| c.label.as_str()),
            Some("Colors")
        );
        assert!(definition.category_of("PLUTO").is_none());
    }

    #[test]
    fn puzzle_id_is_transparent_in_json() {
        let json = serde_json::to_string(&PuzzleId::new("2024-01-10")).unwrap();
        assert_eq!(json, "\"2024-01-10\"");
    }
}
