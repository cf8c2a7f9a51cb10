//! External puzzle supply.
//!
//! The engine only needs a [`PuzzleDefinition`] for an id. Where it comes
//! from is up to the caller: a bundled map, a directory of JSON files, or
//! anything else implementing [`PuzzleSource`]. Fetches are one-shot; any
//! retry policy belongs to the source.

use crate::core::{PuzzleDefinition, PuzzleId};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod error;
pub mod nyt;

pub use error::SourceError;
pub use nyt::{parse_puzzle, NytGroup, NytPuzzle};

/// Supplier of puzzle definitions keyed by id.
pub trait PuzzleSource: Send + Sync {
    fn fetch(&self, id: &PuzzleId) -> Result<PuzzleDefinition, SourceError>;
}

impl<T: PuzzleSource + ?Sized> PuzzleSource for Arc<T> {
    fn fetch(&self, id: &PuzzleId) -> Result<PuzzleDefinition, SourceError> {
        (**self).fetch(id)
    }
}

/// Definitions held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    puzzles: HashMap<PuzzleId, PuzzleDefinition>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any with the same id.
    pub fn with(mut self, definition: PuzzleDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn insert(&mut self, definition: PuzzleDefinition) {
        self.puzzles.insert(definition.id.clone(), definition);
    }
}

impl PuzzleSource for MemorySource {
    fn fetch(&self, id: &PuzzleId) -> Result<PuzzleDefinition, SourceError> {
        self.puzzles
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.clone()))
    }
}

/// Puzzle files named `<id>.json` under a root directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &PuzzleId) -> Result<PathBuf, SourceError> {
        let name = id.as_str();
        let safe = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\']);
        if !safe {
            return Err(SourceError::InvalidId(id.clone()));
        }
        Ok(self.root.join(format!("{name}.json")))
    }
}

impl PuzzleSource for DirectorySource {
    fn fetch(&self, id: &PuzzleId) -> Result<PuzzleDefinition, SourceError> {
        let path = self.path_for(id)?;
        let raw = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(id.clone())
            } else {
                SourceError::Io {
                    id: id.clone(),
                    source,
                }
            }
        })?;
        parse_puzzle(id, &raw)
    }
}
