use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// The difficulty tier of a crossword.
///
/// Each tier fixes the side length of a synthesized grid and how many words the generator tries to fit in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Short, everyday words on a 7x7 grid.
    Easy,

    /// A 10x10 grid.
    Medium,

    /// A 12x12 grid.
    Hard,

    /// The largest grid, 14x14, with exam-level vocabulary.
    Exam,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Exam,
    ];

    /// Side length of a synthesized grid for this tier.
    pub fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 7,
            Difficulty::Medium => 10,
            Difficulty::Hard => 12,
            Difficulty::Exam => 14,
        }
    }

    /// How many words a synthesis attempt draws from the pool.
    pub fn target_word_count(self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 10,
            Difficulty::Hard => 14,
            Difficulty::Exam => 18,
        }
    }

    /// Lowercase name, used in generated puzzle ids.
    pub fn slug(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Exam => "exam",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Exam => "Exam",
        };

        f.write_str(name)
    }
}

/// Returned when text does not name a difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty {0:?}, expected one of easy, medium, hard, exam")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("EXAM".parse::<Difficulty>(), Ok(Difficulty::Exam));
        assert_eq!(" medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn serializes_as_tier_name() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"Hard\"");
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }

    #[test]
    fn grid_holds_target_words() {
        for difficulty in Difficulty::ALL {
            assert!(difficulty.target_word_count() <= 18);
            assert!(difficulty.grid_size() <= 14);
        }
    }
}
