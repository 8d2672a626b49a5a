//! Error types for puzzle selection, synthesis, content loading and validation.

use crate::{Difficulty, Direction};

/// The error returned from [`PuzzleSelector::select`] when nothing at all can be served.
///
/// Synthesis failures and play-history problems are absorbed inside the selector, so this is the only
/// failure a caller has to present to the player.
///
/// [`PuzzleSelector::select`]: crate::PuzzleSelector::select
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// There is no authored puzzle for the difficulty and a new one could not be synthesized either.
    #[error("No crossword puzzles available for difficulty: {0}")]
    NoPuzzlesAvailable(Difficulty),
}

/// Why a single synthesis attempt was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AttemptFailure {
    /// The vocabulary pool holds fewer usable words than the difficulty's target word count.
    #[error("only {available} usable words in the pool, {required} required")]
    PoolExhausted {
        /// Number of usable candidate words.
        available: usize,
        /// Target word count of the difficulty.
        required: usize,
    },

    /// The greedy search stopped before placing enough words.
    #[error("placed {placed} words, {required} required")]
    PlacementDeadlock {
        /// Number of words written into the grid.
        placed: usize,
        /// Minimum number of words for the attempt to count as a success.
        required: usize,
    },
}

/// Every synthesis attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("crossword synthesis gave up after {attempts} attempts: {last_failure}")]
pub struct SynthesisExhausted {
    /// How many attempts were made.
    pub attempts: usize,
    /// The failure of the final attempt.
    pub last_failure: AttemptFailure,
}

/// Errors reading or writing content and play-history files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents were not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A structural defect found by [`Puzzle::validate`].
///
/// [`Puzzle::validate`]: crate::Puzzle::validate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// The solution grid is not `size` rows of `size` cells.
    #[error("grid solution is not {size}x{size}")]
    GridShape {
        /// Declared puzzle size.
        size: usize,
    },

    /// A clue's answer leaves the grid, crosses a blocked cell, or is not delimited by blocked cells.
    #[error("{direction} clue {num} does not match a run of {length} letters at ({row}, {col})")]
    ClueMismatch {
        /// Clue direction.
        direction: Direction,
        /// Clue number.
        num: u32,
        /// Anchor row.
        row: usize,
        /// Anchor column.
        col: usize,
        /// Declared answer length.
        length: usize,
    },

    /// Clue numbers within one list are not strictly ascending.
    #[error("{direction} clue numbers are not strictly ascending at clue {num}")]
    Numbering {
        /// Direction of the offending list.
        direction: Direction,
        /// The first number that is not greater than its predecessor.
        num: u32,
    },

    /// A run of two or more letters has no clue.
    #[error("unclued {direction} run of {length} letters at ({row}, {col})")]
    UncluedRun {
        /// Run direction.
        direction: Direction,
        /// Row of the first letter.
        row: usize,
        /// Column of the first letter.
        col: usize,
        /// Number of letters in the run.
        length: usize,
    },
}
