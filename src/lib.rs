#![warn(missing_docs)]

//! # Word Weaver
//!
//! A crate that serves small vocabulary crosswords by difficulty: hand-authored puzzles first, then puzzles
//! synthesized from a word list with a greedy placement search, then a replay of an authored puzzle.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use word_weaver::{AuthoredCollection, Difficulty, InMemoryVocabulary, MemoryPlayHistory, PuzzleSelector};
//!
//! let selector = PuzzleSelector::new(
//!     AuthoredCollection::bundled().unwrap(),
//!     InMemoryVocabulary::bundled().unwrap(),
//!     MemoryPlayHistory::default(),
//! );
//!
//! let selected = selector.select(Difficulty::Easy, &mut StdRng::seed_from_u64(7)).unwrap();
//! assert_eq!(selected.puzzle.difficulty, Difficulty::Easy);
//! ```

mod clues;
mod content;
mod difficulty;
mod error;
mod generator;
mod grid;
mod layout;
mod puzzle;
mod selection;

pub use clues::{assemble_clues, ClueEntry, Clues};
pub use content::{
    AuthoredCollection, AuthoredPuzzleStore, InMemoryVocabulary, JsonFilePlayHistory,
    MemoryPlayHistory, PlayHistoryStore, VocabularyEntry, VocabularyRepository,
};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use error::{AttemptFailure, Error, PuzzleError, StoreError, SynthesisExhausted};
pub use generator::{Generator, GeneratorConfig};
pub use grid::{Direction, Grid, WordSpan};
pub use layout::{build_layout, CandidateWord, Layout, PlacedWord};
pub use puzzle::Puzzle;
pub use selection::{PuzzleSelector, PuzzleSource, SelectedPuzzle};
