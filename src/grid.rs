use std::fmt::Display;

use array2d::Array2D;

/// The direction a word is read in inside the crossword grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The word goes right from the start position.
    Across,

    /// The word goes down from the start position.
    Down,
}

impl Direction {
    /// The direction crossing this one at a right angle.
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Row and column offset between consecutive letters.
    fn step(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Across => f.write_str("across"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// Describes where a word's letters sit in the grid: a `(row, column)` start, a length and a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordSpan {
    /// The `(row, column)` of the first letter.
    pub begin: (usize, usize),

    /// The number of letters.
    pub len: usize,

    /// The direction the word is read in.
    pub direction: Direction,
}

impl WordSpan {
    /// Creates a new [WordSpan] with the given start cell, length and direction.
    pub fn new(begin: (usize, usize), len: usize, direction: Direction) -> Self {
        Self {
            begin,
            len,
            direction,
        }
    }

    /// Returns all cells of the grid that the word spans across, first letter first.
    pub fn indices(&self) -> Vec<(usize, usize)> {
        (0..self.len).map(|i| self.cell(i)).collect()
    }

    fn cell(&self, i: usize) -> (usize, usize) {
        let (dr, dc) = self.direction.step();
        (self.begin.0 + dr * i, self.begin.1 + dc * i)
    }

    /// Returns whether every letter of the span lies inside a `size` x `size` grid.
    pub fn in_bounds(&self, size: usize) -> bool {
        if self.len == 0 {
            return false;
        }

        let (row, col) = self.cell(self.len - 1);
        row < size && col < size
    }

    /// The cell immediately before the first letter, if it is not off the top or left edge.
    pub fn before(&self) -> Option<(usize, usize)> {
        let (row, col) = self.begin;
        match self.direction {
            Direction::Across => col.checked_sub(1).map(|col| (row, col)),
            Direction::Down => row.checked_sub(1).map(|row| (row, col)),
        }
    }

    /// The cell immediately after the last letter. It may lie outside the grid.
    pub fn after(&self) -> (usize, usize) {
        self.cell(self.len)
    }

    /// The span of a `len`-letter word in the perpendicular direction whose letter at `word_index` lands on
    /// this span's letter at `placed_index`.
    ///
    /// Returns [`None`] when the resulting start would be above or left of the grid.
    pub fn crossing(&self, placed_index: usize, word_index: usize, len: usize) -> Option<WordSpan> {
        let (row, col) = self.cell(placed_index);
        let direction = self.direction.perpendicular();

        let begin = match direction {
            Direction::Across => (row, col.checked_sub(word_index)?),
            Direction::Down => (row.checked_sub(word_index)?, col),
        };

        Some(WordSpan::new(begin, len, direction))
    }
}

/// Uppercases a word and splits it into letters.
pub(crate) fn letters_of(word: &str) -> Vec<char> {
    word.trim().to_uppercase().chars().collect()
}

/// A square crossword grid where each cell is either a letter or empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<Option<char>>,
}

impl Grid {
    /// Creates an empty `size` x `size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            cells: Array2D::filled_with(None, size, size),
        }
    }

    /// The side length of the grid.
    pub fn size(&self) -> usize {
        self.cells.num_rows()
    }

    /// Gets the letter at the specified cell, returning [`None`] if the cell is empty or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row, col).copied().flatten()
    }

    fn is_occupied(&self, (row, col): (usize, usize)) -> bool {
        self.get(row, col).is_some()
    }

    /// Returns whether `word` can be written starting at `(row, col)` in `direction` without breaking the grid.
    ///
    /// A placement is rejected when the word leaves the grid, when it would touch another word end to end,
    /// when it disagrees with a letter already in the grid, when it runs along an existing word in the same
    /// direction, or when one of its new letters would sit beside an existing letter. The word is compared
    /// case-insensitively. The grid is not modified.
    pub fn can_place_word(&self, word: &str, row: usize, col: usize, direction: Direction) -> bool {
        let letters = letters_of(word);
        let span = WordSpan::new((row, col), letters.len(), direction);
        self.can_place(&letters, &span)
    }

    pub(crate) fn can_place(&self, letters: &[char], span: &WordSpan) -> bool {
        if letters.len() != span.len || !span.in_bounds(self.size()) {
            return false;
        }

        if span.before().is_some_and(|cell| self.is_occupied(cell)) || self.is_occupied(span.after()) {
            return false;
        }

        let mut previous_occupied = false;

        for (&letter, cell) in letters.iter().zip(span.indices()) {
            match self.get(cell.0, cell.1) {
                Some(existing) => {
                    // two crossed cells in a row means an existing word runs along this one
                    if existing != letter || previous_occupied {
                        return false;
                    }
                    previous_occupied = true;
                }
                None => {
                    if self
                        .perpendicular_neighbours(cell, span.direction)
                        .into_iter()
                        .flatten()
                        .any(|neighbour| self.is_occupied(neighbour))
                    {
                        return false;
                    }
                    previous_occupied = false;
                }
            }
        }

        true
    }

    fn perpendicular_neighbours(
        &self,
        (row, col): (usize, usize),
        direction: Direction,
    ) -> [Option<(usize, usize)>; 2] {
        match direction {
            Direction::Across => [row.checked_sub(1).map(|r| (r, col)), Some((row + 1, col))],
            Direction::Down => [col.checked_sub(1).map(|c| (row, c)), Some((row, col + 1))],
        }
    }

    /// Counts how many cells of the span already hold a letter.
    pub(crate) fn intersections(&self, span: &WordSpan) -> usize {
        span.indices()
            .into_iter()
            .filter(|&cell| self.is_occupied(cell))
            .count()
    }

    /// Writes `word` at `(row, col)` in `direction` if [`Grid::can_place_word`] allows it.
    ///
    /// Returns whether the word was written.
    pub fn place_word(&mut self, word: &str, row: usize, col: usize, direction: Direction) -> bool {
        let letters = letters_of(word);
        let span = WordSpan::new((row, col), letters.len(), direction);

        if !self.can_place(&letters, &span) {
            return false;
        }

        self.write(&letters, &span);
        true
    }

    pub(crate) fn write(&mut self, letters: &[char], span: &WordSpan) {
        for (&letter, coord) in letters.iter().zip(span.indices()) {
            self.cells[coord] = Some(letter);
        }
    }

    /// The grid as rows of cells, empty cells as [`None`].
    pub fn solution(&self) -> Vec<Vec<Option<char>>> {
        self.cells.as_rows()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows_iter() {
            for cell in row {
                f.write_fmt(format_args!("{} ", cell.unwrap_or('#')))?;
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}
