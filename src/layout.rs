//! Greedy placement of a word list into a square grid.
//!
//! The first word is laid across the middle row. Every further round tries each remaining word against every
//! letter of every placed word and commits the single placement that overlaps the most existing letters.

use crate::grid::{letters_of, Direction, Grid, WordSpan};

/// A vocabulary term that may be written into a grid, together with the text of its clue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateWord {
    letters: Vec<char>,
    definition: String,
}

impl CandidateWord {
    /// Normalizes `term` to uppercase and pairs it with `definition`.
    ///
    /// Returns [`None`] for terms that are shorter than two letters or contain anything other than ASCII
    /// letters, such as spaces, hyphens or apostrophes.
    pub fn new(term: &str, definition: impl Into<String>) -> Option<Self> {
        let letters = letters_of(term);

        if letters.len() < 2 || !letters.iter().all(char::is_ascii_alphabetic) {
            return None;
        }

        Some(Self {
            letters,
            definition: definition.into(),
        })
    }

    /// The uppercase word.
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }

    /// The word's letters.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// The clue text.
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

/// A word written into the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedWord {
    /// The uppercase word.
    pub word: String,

    /// The clue text.
    pub definition: String,

    /// Where the word's letters are.
    pub span: WordSpan,
}

impl PlacedWord {
    fn new(candidate: CandidateWord, span: WordSpan) -> Self {
        Self {
            word: candidate.word(),
            definition: candidate.definition,
            span,
        }
    }

    /// Row of the first letter.
    pub fn row(&self) -> usize {
        self.span.begin.0
    }

    /// Column of the first letter.
    pub fn col(&self) -> usize {
        self.span.begin.1
    }

    /// Reading direction.
    pub fn direction(&self) -> Direction {
        self.span.direction
    }
}

/// The outcome of a placement search: the filled grid and the words in the order they were placed.
#[derive(Clone, Debug)]
pub struct Layout {
    grid: Grid,
    placed: Vec<PlacedWord>,
}

impl Layout {
    /// The grid with every placed word written in.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The placed words, seed word first.
    pub fn placed(&self) -> &[PlacedWord] {
        &self.placed
    }

    /// Splits the layout into its grid and placed words.
    pub fn into_parts(self) -> (Grid, Vec<PlacedWord>) {
        (self.grid, self.placed)
    }
}

/// Places as many of `words` as possible into an empty `size` x `size` grid, in pool order.
///
/// The first word that fits is the seed and goes across the middle row, horizontally centered. After that,
/// each round considers every crossing between a remaining word and an already placed word, keeps the legal
/// placement with the most intersections, and commits it. Ties go to the earlier word in `words`, then to the
/// earlier placed word, then to the earlier letter. The search ends when nothing else fits or after
/// `max_evaluations` legality checks.
pub fn build_layout(size: usize, words: Vec<CandidateWord>, max_evaluations: usize) -> Layout {
    let mut grid = Grid::new(size);
    let mut placed = Vec::new();

    let mut remaining: Vec<CandidateWord> = words
        .into_iter()
        .filter(|word| word.letters.len() <= size)
        .collect();

    if remaining.is_empty() {
        return Layout { grid, placed };
    }

    let seed = remaining.remove(0);
    let len = seed.letters.len();
    let span = WordSpan::new((size / 2, (size - len) / 2), len, Direction::Across);
    grid.write(&seed.letters, &span);
    placed.push(PlacedWord::new(seed, span));

    let mut budget = max_evaluations;

    while !remaining.is_empty() {
        let mut best: Option<(usize, WordSpan, usize)> = None;

        for (index, candidate) in remaining.iter().enumerate() {
            let Some((span, score)) = best_placement(&grid, candidate, &placed, &mut budget) else {
                continue;
            };

            if best.map_or(true, |(_, _, best_score)| score > best_score) {
                best = Some((index, span, score));
            }
        }

        let Some((index, span, intersections)) = best else {
            break;
        };

        let candidate = remaining.remove(index);
        grid.write(&candidate.letters, &span);
        tracing::trace!(
            word = %candidate.word(),
            row = span.begin.0,
            col = span.begin.1,
            direction = %span.direction,
            intersections,
            "placed word"
        );
        placed.push(PlacedWord::new(candidate, span));

        if budget == 0 {
            tracing::warn!(
                max_evaluations,
                placed = placed.len(),
                "placement search hit its evaluation limit"
            );
            break;
        }
    }

    Layout { grid, placed }
}

/// The legal crossing of `candidate` with the most intersections, and that count.
fn best_placement(
    grid: &Grid,
    candidate: &CandidateWord,
    placed: &[PlacedWord],
    budget: &mut usize,
) -> Option<(WordSpan, usize)> {
    let mut best: Option<(WordSpan, usize)> = None;

    for existing in placed {
        for (placed_index, placed_letter) in existing.word.chars().enumerate() {
            for (word_index, &letter) in candidate.letters.iter().enumerate() {
                if letter != placed_letter {
                    continue;
                }

                let len = candidate.letters.len();
                let Some(span) = existing.span.crossing(placed_index, word_index, len) else {
                    continue;
                };

                if *budget == 0 {
                    return best;
                }
                *budget -= 1;

                if !grid.can_place(&candidate.letters, &span) {
                    continue;
                }

                let score = grid.intersections(&span);
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((span, score));
                }
            }
        }
    }

    best
}
