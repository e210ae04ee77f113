//! Daily 5x5 mini crossword
//!
//! - `puzzle`: fixed catalog and daily rotation
//! - `grid`: player entries and error flags
//! - `cursor`: where the selection moves after typing or backspace
//! - `result`: per-date persisted progress
//! - `session`: the screen's state and operations

pub mod cursor;
pub mod grid;
pub mod puzzle;
pub mod result;
pub mod session;

pub use cursor::Cursor;
pub use grid::{Cell, ErrorMarks, PlayerGrid};
pub use puzzle::{Clue, CrosswordPuzzle, Direction, GRID_SIZE, PUZZLES, Pos, todays_puzzle};
pub use result::CrosswordResult;
pub use session::{CrosswordSession, Tab};
