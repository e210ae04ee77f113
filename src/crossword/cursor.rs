//! Cursor movement
//!
//! Pure functions of (puzzle, grid, cursor); no randomness, so a given
//! sequence of entries always walks the same cells.

use super::grid::PlayerGrid;
use super::puzzle::{Clue, CrosswordPuzzle, Direction, Pos};

/// Selected cell plus typing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub pos: Pos,
    pub direction: Direction,
}

/// First blank cell of a word at or after `from`
pub fn first_blank_in_word(word: &Clue, grid: &PlayerGrid, from: usize) -> Option<Pos> {
    (from..word.len())
        .map(|i| word.cell(i))
        .find(|p| grid.is_blank(*p))
}

/// First blank cell over all words of one direction, in word order
pub fn first_blank_in_direction(
    puzzle: &CrosswordPuzzle,
    grid: &PlayerGrid,
    direction: Direction,
) -> Option<Pos> {
    puzzle
        .words(direction)
        .into_iter()
        .find_map(|w| first_blank_in_word(w, grid, 0))
}

/// Where the cursor goes after a letter lands at `cursor.pos`.
///
/// In order: the next blank later in the same word, the first blank of a
/// later word in the same direction, the first blank anywhere in the other
/// direction (switching direction). Stays put otherwise, or when the cell has
/// no word in the current direction.
pub fn advance(puzzle: &CrosswordPuzzle, grid: &PlayerGrid, cursor: Cursor) -> Cursor {
    let Some(word) = puzzle.word_at(cursor.pos, cursor.direction) else {
        return cursor;
    };
    let offset = word.offset_of(cursor.pos).unwrap_or(0);
    if let Some(pos) = first_blank_in_word(word, grid, offset + 1) {
        return Cursor { pos, ..cursor };
    }

    let later_words = puzzle
        .words(cursor.direction)
        .into_iter()
        .skip_while(|w| w.start() != word.start())
        .skip(1);
    for next in later_words {
        if let Some(pos) = first_blank_in_word(next, grid, 0) {
            return Cursor { pos, ..cursor };
        }
    }

    let other = cursor.direction.opposite();
    match first_blank_in_direction(puzzle, grid, other) {
        Some(pos) => Cursor {
            pos,
            direction: other,
        },
        None => cursor,
    }
}

/// Previous writable cell along the direction, if any
pub fn step_back(puzzle: &CrosswordPuzzle, cursor: Cursor) -> Option<Pos> {
    let Pos { row, col } = cursor.pos;
    let prev = match cursor.direction {
        Direction::Across => Pos::new(row, col.checked_sub(1)?),
        Direction::Down => Pos::new(row.checked_sub(1)?, col),
    };
    puzzle.is_open(prev).then_some(prev)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::crossword::grid::Cell;
    use crate::crossword::puzzle::PUZZLES;

    fn at(row: usize, col: usize, direction: Direction) -> Cursor {
        Cursor {
            pos: Pos::new(row, col),
            direction,
        }
    }

    fn fill(grid: &mut PlayerGrid, puzzle: &CrosswordPuzzle, cells: &[(usize, usize)]) {
        for &(r, c) in cells {
            let pos = Pos::new(r, c);
            grid.set(pos, Cell::Letter(puzzle.answer(pos).unwrap()));
        }
    }

    #[test]
    fn test_moves_along_word() {
        let puzzle = &PUZZLES[0];
        let mut grid = PlayerGrid::blank(puzzle);
        fill(&mut grid, puzzle, &[(0, 0)]);
        assert_eq!(
            advance(puzzle, &grid, at(0, 0, Direction::Across)),
            at(0, 1, Direction::Across)
        );
    }

    #[test]
    fn test_skips_filled_cells_in_word() {
        let puzzle = &PUZZLES[0];
        let mut grid = PlayerGrid::blank(puzzle);
        fill(&mut grid, puzzle, &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(
            advance(puzzle, &grid, at(0, 0, Direction::Across)),
            at(0, 3, Direction::Across)
        );
    }

    #[test]
    fn test_jumps_to_next_word() {
        let puzzle = &PUZZLES[0];
        let mut grid = PlayerGrid::blank(puzzle);
        fill(&mut grid, puzzle, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (2, 0)]);
        assert_eq!(
            advance(puzzle, &grid, at(0, 4, Direction::Across)),
            at(2, 1, Direction::Across)
        );
    }

    #[test]
    fn test_earlier_blanks_do_not_pull_back() {
        let puzzle = &PUZZLES[0];
        let mut grid = PlayerGrid::blank(puzzle);
        // Row 0 left blank, rows 2 and 4 filled
        let filled: Vec<_> = (0..5).flat_map(|c| [(2, c), (4, c)]).collect();
        fill(&mut grid, puzzle, &filled);
        // Only later across words are tried, so row 0 is reached going down
        assert_eq!(advance(puzzle, &grid, at(2, 4, Direction::Across)), at(0, 0, Direction::Down));
    }

    #[test]
    fn test_switches_direction_when_exhausted() {
        let puzzle = &PUZZLES[1];
        let mut grid = PlayerGrid::blank(puzzle);
        let across: Vec<_> = (0..5).flat_map(|c| [(0, c), (2, c), (4, c)]).collect();
        fill(&mut grid, puzzle, &across);
        assert_eq!(advance(puzzle, &grid, at(4, 4, Direction::Across)), at(1, 0, Direction::Down));
    }

    #[test]
    fn test_stays_when_full() {
        let puzzle = &PUZZLES[2];
        let grid = PlayerGrid::solved(puzzle);
        let cursor = at(2, 2, Direction::Down);
        assert_eq!(advance(puzzle, &grid, cursor), cursor);
    }

    #[test]
    fn test_no_word_in_direction_stays() {
        let puzzle = &PUZZLES[0];
        let grid = PlayerGrid::blank(puzzle);
        // (1,0) only belongs to a down word
        let cursor = at(1, 0, Direction::Across);
        assert_eq!(advance(puzzle, &grid, cursor), cursor);
    }

    #[test]
    fn test_step_back() {
        let puzzle = &PUZZLES[0];
        assert_eq!(step_back(puzzle, at(0, 3, Direction::Across)), Some(Pos::new(0, 2)));
        assert_eq!(step_back(puzzle, at(0, 0, Direction::Across)), None);
        assert_eq!(step_back(puzzle, at(2, 0, Direction::Down)), Some(Pos::new(1, 0)));
        // Black square behind
        assert_eq!(step_back(puzzle, at(1, 2, Direction::Across)), None);
        assert_eq!(step_back(puzzle, at(0, 2, Direction::Down)), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Replaying the same entries from the same start gives the same walk,
        /// and the cursor never rests on a black square.
        #[test]
        fn prop_advance_is_deterministic(
            puzzle_index in 0usize..3,
            start in 0usize..25,
            down in any::<bool>(),
            steps in 1usize..30,
        ) {
            let puzzle = &PUZZLES[puzzle_index];
            let mut start_pos = Pos::new(start / 5, start % 5);
            if !puzzle.is_open(start_pos) {
                start_pos = Pos::new(0, 0);
            }
            let direction = if down { Direction::Down } else { Direction::Across };

            let walk = || {
                let mut grid = PlayerGrid::blank(puzzle);
                let mut cursor = Cursor { pos: start_pos, direction };
                let mut visited = Vec::new();
                for _ in 0..steps {
                    let answer = puzzle.answer(cursor.pos).unwrap();
                    grid.set(cursor.pos, Cell::Letter(answer));
                    cursor = advance(puzzle, &grid, cursor);
                    visited.push(cursor);
                }
                visited
            };

            let first = walk();
            prop_assert_eq!(&first, &walk());
            for cursor in &first {
                prop_assert!(puzzle.is_open(cursor.pos));
            }
        }
    }
}
