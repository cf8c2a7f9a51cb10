//! Puzzle files: the native definition shape and the NYT-style shape.
//!
//! The NYT-style file keys groups by label and ranks them by `level`
//! 0-3, which maps onto difficulty tiers 1-4.

use super::error::SourceError;
use crate::core::{Category, Difficulty, PuzzleDefinition, PuzzleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A group in an NYT-style puzzle file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NytGroup {
    pub level: u8,
    pub members: Vec<String>,
}

/// NYT-style puzzle file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NytPuzzle {
    #[serde(default)]
    pub id: Option<u64>,
    pub groups: BTreeMap<String, NytGroup>,
}

impl NytPuzzle {
    /// Convert into a definition named `id`, easiest group first.
    pub fn into_definition(self, id: PuzzleId) -> Result<PuzzleDefinition, SourceError> {
        let mut categories = Vec::with_capacity(self.groups.len());
        for (label, group) in self.groups {
            let difficulty = group
                .level
                .checked_add(1)
                .and_then(Difficulty::from_tier)
                .ok_or_else(|| SourceError::Parse {
                    id: id.clone(),
                    message: format!("group '{label}' has unknown level {}", group.level),
                })?;
            categories.push(Category::new(label, difficulty, group.members));
        }
        categories.sort_by_key(|category| category.difficulty);

        Ok(PuzzleDefinition::new(id, categories))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PuzzleFile {
    Native(PuzzleDefinition),
    Nyt(NytPuzzle),
}

/// Parse a puzzle file in either supported shape.
///
/// The returned definition always carries `id`, whatever the file says,
/// so that session records are keyed by what the caller asked for.
pub fn parse_puzzle(id: &PuzzleId, raw: &str) -> Result<PuzzleDefinition, SourceError> {
    let file: PuzzleFile = serde_json::from_str(raw).map_err(|e| SourceError::Parse {
        id: id.clone(),
        message: e.to_string(),
    })?;

    match file {
        PuzzleFile::Native(mut definition) => {
            definition.id = id.clone();
            Ok(definition)
        }
        PuzzleFile::Nyt(puzzle) => puzzle.into_definition(id.clone()),
    }
}
