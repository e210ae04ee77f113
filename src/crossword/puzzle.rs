//! Puzzle catalog
//!
//! Every puzzle uses the same diamond of black squares at (1,1), (1,3),
//! (3,1), (3,3): across words on rows 0, 2, 4 and down words on cols 0, 2, 4.

use serde::{Deserialize, Serialize};

use crate::consts::DAY_MS;

pub const GRID_SIZE: usize = 5;

/// Marks a black square in `CrosswordPuzzle::rows`
const BLACK: u8 = b'#';

/// Grid coordinate (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Reading-order index (top-to-bottom, left-to-right)
    pub fn reading_index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub number: &'static str,
    pub label: &'static str,
    pub answer: &'static str,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Clue {
    pub fn len(&self) -> usize {
        self.answer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    pub fn start(&self) -> Pos {
        Pos::new(self.row, self.col)
    }

    /// Cell holding the `offset`-th letter
    pub fn cell(&self, offset: usize) -> Pos {
        match self.direction {
            Direction::Across => Pos::new(self.row, self.col + offset),
            Direction::Down => Pos::new(self.row + offset, self.col),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.len()).map(|i| self.cell(i))
    }

    /// Offset of `pos` within this word, if the word covers it
    pub fn offset_of(&self, pos: Pos) -> Option<usize> {
        let (fixed, start, along) = match self.direction {
            Direction::Across => (self.row == pos.row, self.col, pos.col),
            Direction::Down => (self.col == pos.col, self.row, pos.row),
        };
        (fixed && along >= start && along < start + self.len()).then(|| along - start)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosswordPuzzle {
    /// Storage key for results
    pub date: &'static str,
    pub title: &'static str,
    /// Solution rows, `#` for black
    pub rows: [&'static str; GRID_SIZE],
    pub clues: &'static [Clue],
}

impl CrosswordPuzzle {
    pub fn in_bounds(pos: Pos) -> bool {
        pos.row < GRID_SIZE && pos.col < GRID_SIZE
    }

    /// Solution letter, `None` for black squares and out-of-range positions
    pub fn answer(&self, pos: Pos) -> Option<char> {
        if !Self::in_bounds(pos) {
            return None;
        }
        match self.rows[pos.row].as_bytes()[pos.col] {
            BLACK => None,
            b => Some(b as char),
        }
    }

    pub fn is_black(&self, pos: Pos) -> bool {
        Self::in_bounds(pos) && self.answer(pos).is_none()
    }

    /// Writable (in range and not black)
    pub fn is_open(&self, pos: Pos) -> bool {
        self.answer(pos).is_some()
    }

    pub fn positions() -> impl Iterator<Item = Pos> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Pos::new(row, col)))
    }

    /// Words in one direction, ordered by start position in reading order
    pub fn words(&self, direction: Direction) -> Vec<&Clue> {
        let mut words: Vec<&Clue> = self
            .clues
            .iter()
            .filter(|c| c.direction == direction)
            .collect();
        words.sort_by_key(|c| c.start().reading_index());
        words
    }

    pub fn word_at(&self, pos: Pos, direction: Direction) -> Option<&Clue> {
        self.clues
            .iter()
            .find(|c| c.direction == direction && c.offset_of(pos).is_some())
    }

    /// Number printed in a cell's corner
    pub fn clue_number_at(&self, pos: Pos) -> Option<&'static str> {
        self.clues
            .iter()
            .find(|c| c.start() == pos)
            .map(|c| c.number)
    }

    /// Clue list for one direction, in catalog order
    pub fn clues_for(&self, direction: Direction) -> impl Iterator<Item = &Clue> {
        self.clues.iter().filter(move |c| c.direction == direction)
    }
}

const fn clue(
    number: &'static str,
    label: &'static str,
    answer: &'static str,
    row: usize,
    col: usize,
    direction: Direction,
) -> Clue {
    Clue {
        number,
        label,
        answer,
        row,
        col,
        direction,
    }
}

use Direction::{Across, Down};

pub static PUZZLES: [CrosswordPuzzle; 3] = [
    CrosswordPuzzle {
        date: "puzzle-0",
        title: "Mini Crossword #1",
        rows: ["CIDER", "R#U#E", "OZONE", "C#M#D", "SNOBS"],
        clues: &[
            clue("1", "Apple drink", "CIDER", 0, 0, Across),
            clue("4", "Atmospheric layer", "OZONE", 2, 0, Across),
            clue("5", "Social climbers", "SNOBS", 4, 0, Across),
            clue("1", "Large reptiles", "CROCS", 0, 0, Down),
            clue("2", "Italian cathedral dome", "DUOMO", 0, 2, Down),
            clue("3", "Marsh plants", "REEDS", 0, 4, Down),
        ],
    },
    CrosswordPuzzle {
        date: "puzzle-1",
        title: "Mini Crossword #2",
        rows: ["BRAVE", "E#R#V", "ABOVE", "R#S#N", "SWEPT"],
        clues: &[
            clue("1", "Courageous", "BRAVE", 0, 0, Across),
            clue("4", "Higher than", "ABOVE", 2, 0, Across),
            clue("5", "Cleaned with a broom", "SWEPT", 4, 0, Across),
            clue("1", "Woodland animals", "BEARS", 0, 0, Down),
            clue("2", "Got up (past tense)", "AROSE", 0, 2, Down),
            clue("3", "Occasion or happening", "EVENT", 0, 4, Down),
        ],
    },
    CrosswordPuzzle {
        date: "puzzle-2",
        title: "Mini Crossword #3",
        rows: ["TOADY", "R#B#I", "AROSE", "C#D#L", "EMEND"],
        clues: &[
            clue("1", "A yes-man", "TOADY", 0, 0, Across),
            clue("4", "Got up (past tense)", "AROSE", 2, 0, Across),
            clue("5", "Correct or revise text", "EMEND", 4, 0, Across),
            clue("1", "Follow a path or trail", "TRACE", 0, 0, Down),
            clue("2", "A home or dwelling", "ABODE", 0, 2, Down),
            clue("3", "Give up / surrender", "YIELD", 0, 4, Down),
        ],
    },
];

/// Days since 1970-01-01 for a proleptic Gregorian date
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Calendar year containing a day count since 1970-01-01
fn year_from_days(days: i64) -> i64 {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let year = yoe + era * 400;
    if mp >= 10 { year + 1 } else { year }
}

/// 1-based day of the year for a local timestamp (see `Clock::local_ms`)
pub fn day_of_year(local_ms: i64) -> u32 {
    let days = local_ms.div_euclid(DAY_MS);
    let year = year_from_days(days);
    (days - days_from_civil(year, 1, 1) + 1) as u32
}

pub fn puzzle_for_day(day_of_year: u32) -> &'static CrosswordPuzzle {
    &PUZZLES[day_of_year as usize % PUZZLES.len()]
}

/// Today's puzzle (rotates daily through the catalog)
pub fn todays_puzzle(local_ms: i64) -> &'static CrosswordPuzzle {
    puzzle_for_day(day_of_year(local_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Clock, ManualClock};

    #[test]
    fn test_catalog_is_consistent() {
        for puzzle in &PUZZLES {
            for black in [(1, 1), (1, 3), (3, 1), (3, 3)] {
                assert!(puzzle.is_black(Pos::new(black.0, black.1)), "{}", puzzle.date);
            }
            for clue in puzzle.clues {
                let spelled: String = clue
                    .cells()
                    .map(|p| puzzle.answer(p).unwrap())
                    .collect();
                assert_eq!(spelled, clue.answer, "{} {}", puzzle.date, clue.number);
            }
            // Every open cell belongs to at least one word
            for pos in CrosswordPuzzle::positions().filter(|p| puzzle.is_open(*p)) {
                assert!(
                    puzzle.word_at(pos, Direction::Across).is_some()
                        || puzzle.word_at(pos, Direction::Down).is_some()
                );
            }
        }
    }

    #[test]
    fn test_word_lookup() {
        let puzzle = &PUZZLES[0];
        let word = puzzle.word_at(Pos::new(2, 3), Direction::Across).unwrap();
        assert_eq!(word.answer, "OZONE");
        assert_eq!(word.offset_of(Pos::new(2, 3)), Some(3));
        assert!(puzzle.word_at(Pos::new(1, 0), Direction::Across).is_none());
        assert_eq!(
            puzzle.word_at(Pos::new(3, 4), Direction::Down).unwrap().answer,
            "REEDS"
        );
        let order: Vec<_> = puzzle.words(Direction::Down).iter().map(|c| c.number).collect();
        assert_eq!(order, ["1", "2", "3"]);
        assert_eq!(puzzle.clue_number_at(Pos::new(0, 2)), Some("2"));
        assert_eq!(puzzle.clue_number_at(Pos::new(1, 0)), None);
    }

    #[test]
    fn test_out_of_range_is_not_open() {
        let puzzle = &PUZZLES[1];
        assert!(!puzzle.is_open(Pos::new(5, 0)));
        assert!(!puzzle.is_black(Pos::new(0, 7)));
    }

    #[test]
    fn test_day_of_year() {
        // 2024-01-01T00:00:00Z
        assert_eq!(day_of_year(1_704_067_200_000), 1);
        // 2024-12-31T23:59:59Z (leap year)
        assert_eq!(day_of_year(1_735_689_599_000), 366);
        // 2023-03-01T12:00:00Z
        assert_eq!(day_of_year(1_677_672_000_000), 60);
        assert_eq!(day_of_year(0), 1);
    }

    #[test]
    fn test_daily_rotation() {
        assert_eq!(puzzle_for_day(1).date, "puzzle-1");
        assert_eq!(puzzle_for_day(3).date, "puzzle-0");
        let jan_2 = 1_704_067_200_000 + DAY_MS;
        assert_eq!(todays_puzzle(jan_2).date, "puzzle-2");
    }

    #[test]
    fn test_rotation_follows_local_date() {
        // 2024-01-01T03:00:00Z is still New Year's Eve at UTC-8
        let clock = ManualClock::new(1_704_078_000_000).with_offset(-8 * 3_600_000);
        assert_eq!(day_of_year(clock.now_ms()), 1);
        assert_eq!(day_of_year(clock.local_ms()), 365);
        assert_eq!(todays_puzzle(clock.now_ms()).date, "puzzle-1");
        assert_eq!(todays_puzzle(clock.local_ms()).date, "puzzle-2");
    }
}
