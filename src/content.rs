//! Where puzzles and words come from, and where plays are remembered.
//!
//! The selector only talks to the three traits here. The in-memory implementations are what the command line
//! tool and the tests use; [`JsonFilePlayHistory`] keeps the played list between runs.

use std::{
    collections::{BTreeSet, HashSet},
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::StoreError, Difficulty, Puzzle};

const BUNDLED_VOCABULARY: &str = include_str!("../data/vocabulary.json");
const BUNDLED_CROSSWORDS: &str = include_str!("../data/crosswords.json");

/// A vocabulary term with its definition, tagged with the tier it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// The word.
    pub term: String,

    /// Used as the clue text.
    pub definition: String,

    /// The tier the word belongs to.
    pub difficulty: Difficulty,
}

/// Supplies candidate words for puzzle synthesis.
#[cfg_attr(test, mockall::automock)]
pub trait VocabularyRepository {
    /// Words of `difficulty` whose term is at most `max_len` characters long.
    fn words(&self, difficulty: Difficulty, max_len: usize) -> Vec<VocabularyEntry>;
}

/// Remembers which authored puzzles have already been served.
#[cfg_attr(test, mockall::automock)]
pub trait PlayHistoryStore {
    /// Ids of every authored puzzle marked as played.
    fn played_ids(&self) -> Result<HashSet<String>, StoreError>;

    /// Marks a puzzle as played. Callers do this once the player has finished it.
    fn mark_played(&mut self, id: &str) -> Result<(), StoreError>;
}

/// The fixed set of hand-built puzzles.
#[cfg_attr(test, mockall::automock)]
pub trait AuthoredPuzzleStore {
    /// Every authored puzzle of `difficulty`, played or not.
    fn puzzles(&self, difficulty: Difficulty) -> Vec<Puzzle>;
}

/// A vocabulary held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryVocabulary {
    entries: Vec<VocabularyEntry>,
}

impl InMemoryVocabulary {
    /// Creates a vocabulary from the given entries.
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        Self { entries }
    }

    /// Parses a JSON array of `{ "term", "definition", "difficulty" }` objects.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Reads a JSON vocabulary file. See [`InMemoryVocabulary::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// The word list shipped with the crate.
    pub fn bundled() -> Result<Self, StoreError> {
        Self::from_json(BUNDLED_VOCABULARY)
    }

    /// Every entry, in insertion order.
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }
}

impl VocabularyRepository for InMemoryVocabulary {
    fn words(&self, difficulty: Difficulty, max_len: usize) -> Vec<VocabularyEntry> {
        self.entries
            .iter()
            .filter(|entry| {
                entry.difficulty == difficulty && entry.term.trim().chars().count() <= max_len
            })
            .cloned()
            .collect()
    }
}

/// A collection of authored puzzles.
#[derive(Clone, Debug, Default)]
pub struct AuthoredCollection {
    puzzles: Vec<Puzzle>,
}

impl AuthoredCollection {
    /// Creates a collection, dropping every puzzle that fails [`Puzzle::validate`].
    pub fn new(puzzles: Vec<Puzzle>) -> Self {
        let puzzles = puzzles
            .into_iter()
            .filter(|puzzle| match puzzle.validate() {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(id = %puzzle.id, error = %err, "skipping invalid authored puzzle");
                    false
                }
            })
            .collect();

        Self { puzzles }
    }

    /// Parses a JSON array of puzzles. Invalid puzzles are dropped as in [`AuthoredCollection::new`].
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Reads a JSON puzzle file. See [`AuthoredCollection::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// The puzzles shipped with the crate.
    pub fn bundled() -> Result<Self, StoreError> {
        Self::from_json(BUNDLED_CROSSWORDS)
    }

    /// Every puzzle that passed validation.
    pub fn all(&self) -> &[Puzzle] {
        &self.puzzles
    }
}

impl AuthoredPuzzleStore for AuthoredCollection {
    fn puzzles(&self, difficulty: Difficulty) -> Vec<Puzzle> {
        self.puzzles
            .iter()
            .filter(|puzzle| puzzle.difficulty == difficulty)
            .cloned()
            .collect()
    }
}

/// A play history that lives only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryPlayHistory {
    played: HashSet<String>,
}

impl MemoryPlayHistory {
    /// Creates a history with the given ids already played.
    pub fn with_played<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            played: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl PlayHistoryStore for MemoryPlayHistory {
    fn played_ids(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.played.clone())
    }

    fn mark_played(&mut self, id: &str) -> Result<(), StoreError> {
        self.played.insert(id.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PlayHistoryFile {
    played: BTreeSet<String>,
}

/// A play history saved as JSON, `{ "played": ["easy-1", ...] }`.
///
/// The file is read on every lookup and rewritten on every [`PlayHistoryStore::mark_played`]. A missing file
/// means nothing has been played yet.
#[derive(Clone, Debug)]
pub struct JsonFilePlayHistory {
    path: PathBuf,
}

impl JsonFilePlayHistory {
    /// Uses the history file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `word-weaver/played_crosswords.json` in the platform's local data directory, if there is one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("word-weaver").join("played_crosswords.json"))
    }

    /// The history file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PlayHistoryFile, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(PlayHistoryFile::default()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PlayHistoryStore for JsonFilePlayHistory {
    fn played_ids(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.load()?.played.into_iter().collect())
    }

    fn mark_played(&mut self, id: &str) -> Result<(), StoreError> {
        let mut file = self.load()?;

        if !file.played.insert(id.to_string()) {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;

        tracing::debug!(id, path = %self.path.display(), "recorded played puzzle");
        Ok(())
    }
}
