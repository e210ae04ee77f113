//! Player grid
//!
//! Stored as JSON rows of `null` (black), `""` (empty) or `"A"` (letter).

use serde::{Deserialize, Serialize};

use super::puzzle::{CrosswordPuzzle, GRID_SIZE, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum Cell {
    Black,
    Empty,
    Letter(char),
}

impl Cell {
    pub fn letter(self) -> Option<char> {
        match self {
            Cell::Letter(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Cell> for Option<String> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Black => None,
            Cell::Empty => Some(String::new()),
            Cell::Letter(c) => Some(c.to_string()),
        }
    }
}

impl TryFrom<Option<String>> for Cell {
    type Error = String;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        let Some(text) = value else {
            return Ok(Cell::Black);
        };
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Cell::Empty),
            (Some(c), None) if c.is_ascii_alphabetic() => Ok(Cell::Letter(c.to_ascii_uppercase())),
            _ => Err(format!("invalid crossword cell {text:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerGrid {
    rows: Vec<Vec<Cell>>,
}

impl PlayerGrid {
    /// Blank grid with the puzzle's black squares
    pub fn blank(puzzle: &CrosswordPuzzle) -> Self {
        Self::from_fn(puzzle, |_| Cell::Empty)
    }

    /// Grid filled with the solution
    pub fn solved(puzzle: &CrosswordPuzzle) -> Self {
        Self::from_fn(puzzle, Cell::Letter)
    }

    fn from_fn(puzzle: &CrosswordPuzzle, mut open: impl FnMut(char) -> Cell) -> Self {
        let rows = (0..GRID_SIZE)
            .map(|row| {
                (0..GRID_SIZE)
                    .map(|col| match puzzle.answer(Pos::new(row, col)) {
                        Some(answer) => open(answer),
                        None => Cell::Black,
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Same shape and black pattern as the puzzle
    pub fn fits(&self, puzzle: &CrosswordPuzzle) -> bool {
        self.rows.len() == GRID_SIZE
            && self.rows.iter().enumerate().all(|(row, cells)| {
                cells.len() == GRID_SIZE
                    && cells.iter().enumerate().all(|(col, cell)| {
                        (*cell == Cell::Black) == puzzle.is_black(Pos::new(row, col))
                    })
            })
    }

    pub fn get(&self, pos: Pos) -> Cell {
        self.rows
            .get(pos.row)
            .and_then(|r| r.get(pos.col))
            .copied()
            .unwrap_or(Cell::Black)
    }

    /// Write an open cell. Black squares are never written.
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        debug_assert_ne!(cell, Cell::Black);
        if let Some(slot) = self.rows.get_mut(pos.row).and_then(|r| r.get_mut(pos.col)) {
            if *slot != Cell::Black {
                *slot = cell;
            }
        }
    }

    pub fn is_blank(&self, pos: Pos) -> bool {
        self.get(pos).is_empty()
    }

    /// Every open cell matches the solution
    pub fn is_solved(&self, puzzle: &CrosswordPuzzle) -> bool {
        debug_assert!(self.fits(puzzle), "grid shape disagrees with {}", puzzle.date);
        CrosswordPuzzle::positions()
            .all(|pos| match puzzle.answer(pos) {
                Some(answer) => self.get(pos).letter() == Some(answer),
                None => true,
            })
    }

    pub fn filled_count(&self) -> usize {
        CrosswordPuzzle::positions()
            .filter(|p| self.get(*p).letter().is_some())
            .count()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// Per-cell "wrong letter" flags set by a check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMarks {
    marks: [[bool; GRID_SIZE]; GRID_SIZE],
}

impl ErrorMarks {
    /// Flag every filled cell whose letter disagrees with the solution
    pub fn check(grid: &PlayerGrid, puzzle: &CrosswordPuzzle) -> Self {
        let mut marks = Self::default();
        for pos in CrosswordPuzzle::positions() {
            if let (Some(answer), Some(letter)) = (puzzle.answer(pos), grid.get(pos).letter()) {
                marks.marks[pos.row][pos.col] = letter != answer;
            }
        }
        marks
    }

    pub fn is_marked(&self, pos: Pos) -> bool {
        CrosswordPuzzle::in_bounds(pos) && self.marks[pos.row][pos.col]
    }

    pub fn clear(&mut self, pos: Pos) {
        if CrosswordPuzzle::in_bounds(pos) {
            self.marks[pos.row][pos.col] = false;
        }
    }

    pub fn count(&self) -> usize {
        self.marks.iter().flatten().filter(|m| **m).count()
    }
}
