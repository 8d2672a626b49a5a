use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::{
    content::{AuthoredPuzzleStore, PlayHistoryStore, VocabularyRepository},
    error::Error,
    Difficulty, Generator, Puzzle,
};

/// Where a selected puzzle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleSource {
    /// An authored puzzle the player has not seen yet.
    Authored,

    /// A puzzle built just now from the vocabulary.
    Synthesized,

    /// An authored puzzle served again because nothing new could be made.
    Replay,
}

/// A puzzle ready to play, and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPuzzle {
    /// The puzzle.
    pub puzzle: Puzzle,

    /// How it was chosen.
    pub source: PuzzleSource,
}

/// Chooses a crossword for a difficulty: unplayed authored puzzles first, then a synthesized one, then a
/// replay of any authored puzzle.
pub struct PuzzleSelector<A, V, H> {
    authored: A,
    vocabulary: V,
    history: H,
    generator: Generator,
}

impl<A, V, H> PuzzleSelector<A, V, H>
where
    A: AuthoredPuzzleStore,
    V: VocabularyRepository,
    H: PlayHistoryStore,
{
    /// Creates a selector with a default [`Generator`].
    pub fn new(authored: A, vocabulary: V, history: H) -> Self {
        Self {
            authored,
            vocabulary,
            history,
            generator: Generator::new(),
        }
    }

    /// Replaces the generator used when no unplayed authored puzzle is left.
    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    /// The play history consulted by [`PuzzleSelector::select`].
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the play history, for recording finished puzzles.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Picks a puzzle for `difficulty`.
    ///
    /// Returns a random unplayed authored puzzle if there is one. Otherwise a new puzzle is synthesized from
    /// the vocabulary, and if that fails too a random authored puzzle is replayed. Only when the difficulty has
    /// no authored puzzles and synthesis fails is [`Error::NoPuzzlesAvailable`] returned.
    ///
    /// The play history is only read. A history that cannot be read counts as empty.
    pub fn select<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<SelectedPuzzle, Error> {
        let authored = self.authored.puzzles(difficulty);

        let played = self.history.played_ids().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read play history, treating every puzzle as unplayed");
            HashSet::new()
        });

        let unplayed: Vec<&Puzzle> = authored
            .iter()
            .filter(|puzzle| !played.contains(&puzzle.id))
            .collect();

        if let Some(&puzzle) = unplayed.choose(rng) {
            tracing::info!(%difficulty, id = %puzzle.id, "serving authored crossword");
            return Ok(SelectedPuzzle {
                puzzle: puzzle.clone(),
                source: PuzzleSource::Authored,
            });
        }

        match self.generator.synthesize(difficulty, &self.vocabulary, rng) {
            Ok(puzzle) => {
                tracing::info!(%difficulty, id = %puzzle.id, "serving synthesized crossword");
                return Ok(SelectedPuzzle {
                    puzzle,
                    source: PuzzleSource::Synthesized,
                });
            }
            Err(exhausted) => {
                tracing::info!(%difficulty, reason = %exhausted, "falling back to an authored crossword");
            }
        }

        match authored.choose(rng) {
            Some(puzzle) => {
                tracing::info!(%difficulty, id = %puzzle.id, "replaying authored crossword");
                Ok(SelectedPuzzle {
                    puzzle: puzzle.clone(),
                    source: PuzzleSource::Replay,
                })
            }
            None => {
                tracing::warn!(%difficulty, "no crossword available");
                Err(Error::NoPuzzlesAvailable(difficulty))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        clues::{ClueEntry, Clues},
        content::{
            InMemoryVocabulary, MemoryPlayHistory, MockAuthoredPuzzleStore, MockPlayHistoryStore,
            MockVocabularyRepository, VocabularyEntry,
        },
        error::StoreError,
        GeneratorConfig,
    };

    fn cat_square(id: &str) -> Puzzle {
        let clue = |num, row, col| ClueEntry {
            num,
            row,
            col,
            clue: format!("clue {num}"),
            length: 3,
        };

        Puzzle {
            id: id.to_string(),
            difficulty: Difficulty::Easy,
            size: 3,
            grid_solution: ["CAT", "ARE", "TEA"]
                .iter()
                .map(|row| row.chars().map(Some).collect())
                .collect(),
            clues: Clues {
                across: vec![clue(1, 0, 0), clue(4, 1, 0), clue(5, 2, 0)],
                down: vec![clue(1, 0, 0), clue(2, 0, 1), clue(3, 0, 2)],
            },
        }
    }

    fn authored(puzzles: Vec<Puzzle>) -> MockAuthoredPuzzleStore {
        let mut store = MockAuthoredPuzzleStore::new();
        store.expect_puzzles().returning(move |difficulty| {
            puzzles
                .iter()
                .filter(|puzzle| puzzle.difficulty == difficulty)
                .cloned()
                .collect()
        });
        store
    }

    fn at_vocabulary() -> InMemoryVocabulary {
        InMemoryVocabulary::new(
            ["bat", "cat", "hat", "mat", "rat", "sat", "pat", "vat"]
                .iter()
                .map(|term| VocabularyEntry {
                    term: term.to_string(),
                    definition: format!("meaning of {term}"),
                    difficulty: Difficulty::Easy,
                })
                .collect(),
        )
    }

    fn lenient() -> Generator {
        Generator::with_config(GeneratorConfig {
            min_placement_ratio: 0.3,
            ..GeneratorConfig::default()
        })
    }

    #[test]
    fn unplayed_authored_puzzle_is_served_without_synthesis() {
        let mut vocabulary = MockVocabularyRepository::new();
        vocabulary.expect_words().never();

        let selector = PuzzleSelector::new(
            authored(vec![cat_square("easy-1")]),
            vocabulary,
            MemoryPlayHistory::default(),
        );

        let selected = selector
            .select(Difficulty::Easy, &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(selected.source, PuzzleSource::Authored);
        assert_eq!(selected.puzzle.id, "easy-1");
    }

    #[test]
    fn played_authored_puzzle_gives_way_to_synthesis() {
        let mut history = MockPlayHistoryStore::new();
        history
            .expect_played_ids()
            .returning(|| Ok(HashSet::from(["easy-1".to_string()])));

        let selector = PuzzleSelector::new(authored(vec![cat_square("easy-1")]), at_vocabulary(), history)
            .with_generator(lenient());

        let selected = selector
            .select(Difficulty::Easy, &mut StdRng::seed_from_u64(5))
            .unwrap();

        assert_eq!(selected.source, PuzzleSource::Synthesized);
        assert!(selected.puzzle.id.starts_with("generated-easy-"));
        assert_eq!(selected.puzzle.validate(), Ok(()));
    }

    #[test]
    fn played_authored_puzzle_is_replayed_when_synthesis_fails() {
        let selector = PuzzleSelector::new(
            authored(vec![cat_square("easy-1"), cat_square("easy-2")]),
            InMemoryVocabulary::default(),
            MemoryPlayHistory::with_played(["easy-1", "easy-2"]),
        );

        let selected = selector
            .select(Difficulty::Easy, &mut StdRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(selected.source, PuzzleSource::Replay);
        assert!(selected.puzzle.id.starts_with("easy-"));
    }

    #[test]
    fn nothing_available_names_the_difficulty() {
        let selector = PuzzleSelector::new(
            authored(vec![cat_square("easy-1")]),
            InMemoryVocabulary::default(),
            MemoryPlayHistory::default(),
        );

        let err = selector
            .select(Difficulty::Exam, &mut StdRng::seed_from_u64(0))
            .unwrap_err();

        assert_eq!(err, Error::NoPuzzlesAvailable(Difficulty::Exam));
        assert!(err.to_string().contains("Exam"));
    }

    #[test]
    fn unreadable_history_counts_as_empty() {
        let mut history = MockPlayHistoryStore::new();
        history.expect_played_ids().returning(|| {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        });
        history.expect_mark_played().never();

        let selector = PuzzleSelector::new(
            authored(vec![cat_square("easy-1")]),
            InMemoryVocabulary::default(),
            history,
        );

        let selected = selector
            .select(Difficulty::Easy, &mut StdRng::seed_from_u64(4))
            .unwrap();
        assert_eq!(selected.source, PuzzleSource::Authored);
    }

    #[test]
    fn recording_a_play_moves_on_to_the_next_puzzle() {
        let mut selector = PuzzleSelector::new(
            authored(vec![cat_square("easy-1"), cat_square("easy-2")]),
            InMemoryVocabulary::default(),
            MemoryPlayHistory::default(),
        );
        let mut rng = StdRng::seed_from_u64(21);

        let first = selector.select(Difficulty::Easy, &mut rng).unwrap();
        selector.history_mut().mark_played(&first.puzzle.id).unwrap();

        let second = selector.select(Difficulty::Easy, &mut rng).unwrap();
        assert_eq!(second.source, PuzzleSource::Authored);
        assert_ne!(first.puzzle.id, second.puzzle.id);
        assert!(selector.history().played_ids().unwrap().contains(&first.puzzle.id));
    }
}
