use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{grid::Direction, layout::PlacedWord};

/// One numbered clue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    /// The clue number shown in the anchor cell.
    pub num: u32,

    /// Row of the answer's first letter.
    pub row: usize,

    /// Column of the answer's first letter.
    pub col: usize,

    /// The prompt shown to the player.
    pub clue: String,

    /// Number of letters in the answer.
    pub length: usize,
}

/// The across and down clue lists of a puzzle, each ordered by clue number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clues {
    /// Clues read left to right.
    pub across: Vec<ClueEntry>,

    /// Clues read top to bottom.
    pub down: Vec<ClueEntry>,
}

impl Clues {
    /// The clue list for `direction`.
    pub fn list(&self, direction: Direction) -> &[ClueEntry] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }
}

/// Numbers the placed words in reading order and splits them into across and down clues.
///
/// Start cells are numbered 1, 2, 3... sorted by row then column. An across and a down word that start in
/// the same cell share a number.
pub fn assemble_clues(placed: &[PlacedWord]) -> Clues {
    let mut ordered: Vec<&PlacedWord> = placed.iter().collect();
    ordered.sort_by_key(|word| word.span.begin);

    let mut numbers: HashMap<(usize, usize), u32> = HashMap::new();
    let mut clues = Clues::default();

    for word in ordered {
        let next = numbers.len() as u32 + 1;
        let num = *numbers.entry(word.span.begin).or_insert(next);

        let entry = ClueEntry {
            num,
            row: word.row(),
            col: word.col(),
            clue: word.definition.clone(),
            length: word.word.chars().count(),
        };

        match word.direction() {
            Direction::Across => clues.across.push(entry),
            Direction::Down => clues.down.push(entry),
        }
    }

    clues.across.sort_by_key(|entry| entry.num);
    clues.down.sort_by_key(|entry| entry.num);

    clues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WordSpan;

    fn placed(word: &str, begin: (usize, usize), direction: Direction) -> PlacedWord {
        PlacedWord {
            word: word.to_string(),
            definition: format!("clue for {word}"),
            span: WordSpan::new(begin, word.len(), direction),
        }
    }

    #[test]
    fn numbers_in_reading_order() {
        let words = [
            placed("PLANT", (3, 0), Direction::Across),
            placed("EARTH", (0, 4), Direction::Down),
            placed("STONE", (0, 0), Direction::Across),
            placed("SHIPS", (0, 0), Direction::Down),
        ];

        let clues = assemble_clues(&words);

        let across: Vec<(u32, &str)> = clues.across.iter().map(|c| (c.num, c.clue.as_str())).collect();
        let down: Vec<(u32, &str)> = clues.down.iter().map(|c| (c.num, c.clue.as_str())).collect();

        assert_eq!(across, vec![(1, "clue for STONE"), (3, "clue for PLANT")]);
        assert_eq!(down, vec![(1, "clue for SHIPS"), (2, "clue for EARTH")]);
    }

    #[test]
    fn lengths_and_anchors() {
        let clues = assemble_clues(&[
            placed("CAT", (2, 1), Direction::Across),
            placed("TACO", (0, 1), Direction::Down),
        ]);

        assert_eq!(
            clues.down,
            vec![ClueEntry {
                num: 1,
                row: 0,
                col: 1,
                clue: "clue for TACO".to_string(),
                length: 4,
            }]
        );
        assert_eq!(clues.across[0].num, 2);
        assert_eq!(clues.across[0].length, 3);
        assert_eq!(clues.list(Direction::Across).len(), 1);
    }

    #[test]
    fn no_words_no_clues() {
        assert_eq!(assemble_clues(&[]), Clues::default());
    }
}
