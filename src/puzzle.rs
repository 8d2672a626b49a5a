use std::{collections::HashSet, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{
    clues::{ClueEntry, Clues},
    error::PuzzleError,
    grid::{Direction, WordSpan},
    Difficulty,
};

/// A complete crossword: the solution grid and its numbered clues.
///
/// Authored and synthesized puzzles share this shape. Cells that belong to no answer are [`None`] and act as
/// blocked squares. With serde the fields are named `id`, `difficulty`, `size`, `gridSolution` and `clues`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    /// Identifier recorded in the play history.
    pub id: String,

    /// The tier the puzzle was made for.
    pub difficulty: Difficulty,

    /// Side length of the grid.
    pub size: usize,

    /// `size` rows of `size` cells, each an uppercase letter or blocked.
    pub grid_solution: Vec<Vec<Option<char>>>,

    /// The across and down clues.
    pub clues: Clues,
}

impl Puzzle {
    /// Gets the solution letter at the specified cell, returning [`None`] for blocked or out of bounds cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.grid_solution.get(row)?.get(col).copied().flatten()
    }

    /// Reads the answer to `clue` out of the grid, or [`None`] if one of its cells is blocked or outside.
    pub fn answer(&self, clue: &ClueEntry, direction: Direction) -> Option<String> {
        WordSpan::new((clue.row, clue.col), clue.length, direction)
            .indices()
            .into_iter()
            .map(|(row, col)| self.cell(row, col))
            .collect()
    }

    /// Checks that the grid and the clues describe the same crossword.
    ///
    /// Every clue must cover a run of exactly `length` letters that is delimited by blocked cells or the grid
    /// edge, clue numbers must be strictly ascending in both lists, and every run of two or more letters must
    /// have a clue in its direction.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.grid_solution.len() != self.size
            || self.grid_solution.iter().any(|row| row.len() != self.size)
        {
            return Err(PuzzleError::GridShape { size: self.size });
        }

        for direction in [Direction::Across, Direction::Down] {
            let list = self.clues.list(direction);

            for pair in list.windows(2) {
                if pair[1].num <= pair[0].num {
                    return Err(PuzzleError::Numbering {
                        direction,
                        num: pair[1].num,
                    });
                }
            }

            for clue in list {
                if !self.clue_matches_run(clue, direction) {
                    return Err(PuzzleError::ClueMismatch {
                        direction,
                        num: clue.num,
                        row: clue.row,
                        col: clue.col,
                        length: clue.length,
                    });
                }
            }

            let clued: HashSet<((usize, usize), usize)> = list
                .iter()
                .map(|clue| ((clue.row, clue.col), clue.length))
                .collect();

            if let Some(run) = self
                .runs(direction)
                .into_iter()
                .find(|run| !clued.contains(&(run.begin, run.len)))
            {
                return Err(PuzzleError::UncluedRun {
                    direction,
                    row: run.begin.0,
                    col: run.begin.1,
                    length: run.len,
                });
            }
        }

        Ok(())
    }

    fn clue_matches_run(&self, clue: &ClueEntry, direction: Direction) -> bool {
        let span = WordSpan::new((clue.row, clue.col), clue.length, direction);

        if !span.in_bounds(self.size) || self.answer(clue, direction).is_none() {
            return false;
        }

        let before_blocked = span
            .before()
            .map_or(true, |(row, col)| self.cell(row, col).is_none());
        let (row, col) = span.after();

        before_blocked && self.cell(row, col).is_none()
    }

    /// Every maximal run of two or more letters in `direction`.
    fn runs(&self, direction: Direction) -> Vec<WordSpan> {
        let mut runs = Vec::new();

        for line in 0..self.size {
            let mut start = None;

            for i in 0..=self.size {
                let (row, col) = match direction {
                    Direction::Across => (line, i),
                    Direction::Down => (i, line),
                };

                match (self.cell(row, col), start) {
                    (Some(_), None) => start = Some((row, col)),
                    (None, Some(begin)) => {
                        let len = match direction {
                            Direction::Across => col - begin.1,
                            Direction::Down => row - begin.0,
                        };
                        if len >= 2 {
                            runs.push(WordSpan::new(begin, len, direction));
                        }
                        start = None;
                    }
                    _ => {}
                }
            }
        }

        runs
    }

    /// Renders the unsolved grid: `_` for a square to fill in and `#` for a blocked square.
    pub fn blank_grid(&self) -> String {
        let mut out = String::new();

        for row in &self.grid_solution {
            for cell in row {
                out.push(if cell.is_some() { '_' } else { '#' });
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.grid_solution {
            for cell in row {
                f.write_fmt(format_args!("{} ", cell.unwrap_or('#')))?;
            }
            f.write_str("\n")?;
        }

        for (heading, list) in [("Across", &self.clues.across), ("Down", &self.clues.down)] {
            writeln!(f, "\n{heading}")?;
            for clue in list {
                writeln!(f, "  {}. {} ({})", clue.num, clue.clue, clue.length)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clue(num: u32, row: usize, col: usize, length: usize) -> ClueEntry {
        ClueEntry {
            num,
            row,
            col,
            clue: format!("clue {num}"),
            length,
        }
    }

    fn grid(rows: &[&str]) -> Vec<Vec<Option<char>>> {
        rows.iter()
            .map(|row| row.chars().map(|ch| (ch != '.').then_some(ch)).collect())
            .collect()
    }

    /// STONE and PLANT across, SHIPS and EARTH down.
    fn ship_puzzle() -> Puzzle {
        Puzzle {
            id: "hard-1".to_string(),
            difficulty: Difficulty::Hard,
            size: 5,
            grid_solution: grid(&["STONE", "H...A", "I...R", "PLANT", "S...H"]),
            clues: Clues {
                across: vec![clue(1, 0, 0, 5), clue(3, 3, 0, 5)],
                down: vec![clue(1, 0, 0, 5), clue(2, 0, 4, 5)],
            },
        }
    }

    #[test]
    fn valid_puzzle_passes() {
        let puzzle = ship_puzzle();
        assert_eq!(puzzle.validate(), Ok(()));
        assert_eq!(
            puzzle.answer(&puzzle.clues.down[1], Direction::Down).as_deref(),
            Some("EARTH")
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        let mut puzzle = ship_puzzle();
        puzzle.clues.across[1].length = 4;

        assert!(matches!(
            puzzle.validate(),
            Err(PuzzleError::ClueMismatch { num: 3, .. })
        ));
    }

    #[test]
    fn clue_through_blocked_cell_is_rejected() {
        let mut puzzle = ship_puzzle();
        puzzle.clues.down.push(clue(4, 0, 2, 4));

        assert!(puzzle.answer(&puzzle.clues.down[2], Direction::Down).is_none());
        assert!(matches!(puzzle.validate(), Err(PuzzleError::ClueMismatch { .. })));
    }

    #[test]
    fn descending_numbers_are_rejected() {
        let mut puzzle = ship_puzzle();
        puzzle.clues.across.swap(0, 1);

        assert_eq!(
            puzzle.validate(),
            Err(PuzzleError::Numbering {
                direction: Direction::Across,
                num: 1
            })
        );
    }

    #[test]
    fn unclued_run_is_rejected() {
        let mut puzzle = ship_puzzle();
        puzzle.clues.down.pop();

        assert_eq!(
            puzzle.validate(),
            Err(PuzzleError::UncluedRun {
                direction: Direction::Down,
                row: 0,
                col: 4,
                length: 5
            })
        );
    }

    #[test]
    fn bad_shape_is_rejected() {
        let mut puzzle = ship_puzzle();
        puzzle.grid_solution.pop();

        assert_eq!(puzzle.validate(), Err(PuzzleError::GridShape { size: 5 }));
    }

    #[test]
    fn json_uses_grid_solution_with_nulls() {
        let json = serde_json::to_value(ship_puzzle()).unwrap();

        assert_eq!(json["gridSolution"][1][1], serde_json::Value::Null);
        assert_eq!(json["gridSolution"][0][0], "S");
        assert_eq!(json["difficulty"], "Hard");
        assert_eq!(json["clues"]["across"][1]["num"], 3);
    }

    #[test]
    fn renders_blank_and_solved() {
        let puzzle = ship_puzzle();

        assert!(puzzle.blank_grid().starts_with("_ _ _ _ _ \n_ # # # _ \n"));

        let text = puzzle.to_string();
        assert!(text.starts_with("S T O N E \nH # # # A \n"));
        assert!(text.contains("Down\n  1. clue 1 (5)\n  2. clue 2 (5)\n"));
    }
}
