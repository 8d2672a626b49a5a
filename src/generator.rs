use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::{
    clues::assemble_clues,
    content::{VocabularyEntry, VocabularyRepository},
    error::{AttemptFailure, SynthesisExhausted},
    layout::{build_layout, CandidateWord},
    Difficulty, Puzzle,
};

/// Configuration for crossword synthesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// How many attempts [`Generator::synthesize`] makes before giving up.
    pub max_attempts: usize,

    /// Fraction of the target word count that must be placed for an attempt to succeed.
    pub min_placement_ratio: f64,

    /// Upper bound on legality checks in one placement search.
    pub max_evaluations: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_placement_ratio: 0.7,
            max_evaluations: 500_000,
        }
    }
}

/// Builds crosswords from a vocabulary pool.
///
/// All randomness comes from the `rng` handed to each call, so a seeded RNG gives the same puzzle for the
/// same pool every time.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with a custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The generator's configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Minimum number of placed words for an attempt drawing `target` words to succeed.
    pub fn required_placements(&self, target: usize) -> usize {
        (target as f64 * self.config.min_placement_ratio).ceil() as usize
    }

    /// Turns pool entries into placeable words for a `size` grid.
    ///
    /// Terms that are not plain letters or are longer than `size` are dropped, as are repeats of a term
    /// already seen (compared case-insensitively).
    pub fn candidates(size: usize, entries: &[VocabularyEntry]) -> Vec<CandidateWord> {
        let mut seen = HashSet::new();

        entries
            .iter()
            .filter_map(|entry| CandidateWord::new(&entry.term, entry.definition.clone()))
            .filter(|candidate| candidate.letters().len() <= size)
            .filter(|candidate| seen.insert(candidate.word()))
            .collect()
    }

    /// Makes one synthesis attempt for `difficulty` from `entries`.
    ///
    /// The usable words are shuffled, the first [`Difficulty::target_word_count`] of them are laid out on a
    /// [`Difficulty::grid_size`] grid, and the result is accepted if enough of them were placed.
    pub fn attempt<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        entries: &[VocabularyEntry],
        rng: &mut R,
    ) -> Result<Puzzle, AttemptFailure> {
        let size = difficulty.grid_size();
        let target = difficulty.target_word_count();

        let mut candidates = Self::candidates(size, entries);
        if candidates.len() < target {
            return Err(AttemptFailure::PoolExhausted {
                available: candidates.len(),
                required: target,
            });
        }

        candidates.shuffle(rng);
        candidates.truncate(target);

        let layout = build_layout(size, candidates, self.config.max_evaluations);

        let required = self.required_placements(target);
        if layout.placed().len() < required {
            return Err(AttemptFailure::PlacementDeadlock {
                placed: layout.placed().len(),
                required,
            });
        }

        let (grid, placed) = layout.into_parts();

        Ok(Puzzle {
            id: format!("generated-{}-{:08x}", difficulty.slug(), rng.gen::<u32>()),
            difficulty,
            size,
            grid_solution: grid.solution(),
            clues: assemble_clues(&placed),
        })
    }

    /// Synthesizes a puzzle for `difficulty`, retrying up to [`GeneratorConfig::max_attempts`] times.
    ///
    /// The vocabulary is queried once. Attempts run one after another, each with a fresh shuffle.
    pub fn synthesize<V, R>(
        &self,
        difficulty: Difficulty,
        vocabulary: &V,
        rng: &mut R,
    ) -> Result<Puzzle, SynthesisExhausted>
    where
        V: VocabularyRepository + ?Sized,
        R: Rng + ?Sized,
    {
        let entries = vocabulary.words(difficulty, difficulty.grid_size());
        let attempts = self.config.max_attempts.max(1);

        let mut last_failure = None;

        for attempt in 1..=attempts {
            match self.attempt(difficulty, &entries, rng) {
                Ok(puzzle) => {
                    tracing::debug!(
                        %difficulty,
                        attempt,
                        id = %puzzle.id,
                        words = puzzle.clues.across.len() + puzzle.clues.down.len(),
                        "synthesized crossword"
                    );
                    return Ok(puzzle);
                }
                Err(failure) => {
                    tracing::debug!(%difficulty, attempt, %failure, "synthesis attempt failed");
                    last_failure = Some(failure);
                }
            }
        }

        Err(SynthesisExhausted {
            attempts,
            last_failure: last_failure.unwrap_or(AttemptFailure::PoolExhausted {
                available: 0,
                required: difficulty.target_word_count(),
            }),
        })
    }
}
