//! Crossword screen session
//!
//! Holds the player's grid and selection for one puzzle date, persists partial
//! progress after every change and pays the solve bonus once.

use super::cursor::{self, Cursor};
use super::grid::{Cell, ErrorMarks, PlayerGrid};
use super::puzzle::{Clue, CrosswordPuzzle, Direction, Pos, todays_puzzle};
use super::result::{self, CrosswordResult};
use crate::host::Host;
use crate::leaderboard::Leaderboard;
use crate::platform::Platform;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Puzzle,
    Leaderboard,
}

pub struct CrosswordSession<H: Host> {
    platform: Platform,
    host: H,
    puzzle: &'static CrosswordPuzzle,
    bonus: u32,
    secret_restart_clicks: u32,

    grid: PlayerGrid,
    errors: ErrorMarks,
    selected: Option<Pos>,
    direction: Direction,
    tab: Tab,

    completed: bool,
    solve_ms: i64,
    /// Elapsed time as last refreshed (or restored)
    elapsed_ms: i64,
    hints_used: u32,
    /// Clock reading at which elapsed time was zero; `Some` while running
    timer_origin: Option<i64>,
    leaderboard_clicks: u32,
}

impl<H: Host> CrosswordSession<H> {
    /// Today's puzzle with the stored settings
    pub fn new(platform: Platform, host: H) -> Self {
        let puzzle = todays_puzzle(platform.local_ms());
        let settings = Settings::load(platform.store.as_ref());
        Self::with_puzzle(platform, host, &settings, puzzle)
    }

    /// Restores any saved progress for `puzzle`
    pub fn with_puzzle(
        platform: Platform,
        host: H,
        settings: &Settings,
        puzzle: &'static CrosswordPuzzle,
    ) -> Self {
        let mut session = Self {
            platform,
            host,
            puzzle,
            bonus: settings.crossword_bonus,
            secret_restart_clicks: settings.secret_restart_clicks,
            grid: PlayerGrid::blank(puzzle),
            errors: ErrorMarks::default(),
            selected: None,
            direction: Direction::Across,
            tab: Tab::Puzzle,
            completed: false,
            solve_ms: 0,
            elapsed_ms: 0,
            hints_used: 0,
            timer_origin: None,
            leaderboard_clicks: 0,
        };
        session.restore();
        session
    }

    fn restore(&mut self) {
        let Some(saved) = result::load_result(self.platform.store.as_ref(), self.puzzle.date) else {
            return;
        };
        if saved.completed {
            log::info!(
                "{} already solved in {}",
                self.puzzle.date,
                crate::format_time(saved.solve_ms)
            );
            self.grid = PlayerGrid::solved(self.puzzle);
            self.completed = true;
            self.solve_ms = saved.solve_ms;
            self.elapsed_ms = saved.solve_ms;
            self.hints_used = saved.hints_used.unwrap_or(0);
            return;
        }
        match saved.grid_state {
            Some(grid) if grid.fits(self.puzzle) => {
                log::info!("Resuming {} ({} letters)", self.puzzle.date, grid.filled_count());
                self.grid = grid;
                self.elapsed_ms = saved.elapsed_saved.unwrap_or(0).max(0);
                self.hints_used = saved.hints_used.unwrap_or(0);
            }
            Some(_) => {
                log::warn!("Saved grid for {} does not fit, starting fresh", self.puzzle.date)
            }
            None => {}
        }
    }

    // === Accessors ===

    pub fn puzzle(&self) -> &'static CrosswordPuzzle {
        self.puzzle
    }

    pub fn grid(&self) -> &PlayerGrid {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid.get(Pos::new(row, col))
    }

    pub fn errors(&self) -> &ErrorMarks {
        &self.errors
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn solve_ms(&self) -> i64 {
        self.solve_ms
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Start/Resume has been pressed (or the puzzle is finished)
    pub fn is_playing(&self) -> bool {
        self.timer_origin.is_some() || self.completed
    }

    pub fn across_clues(&self) -> impl Iterator<Item = &Clue> {
        self.puzzle.clues_for(Direction::Across)
    }

    pub fn down_clues(&self) -> impl Iterator<Item = &Clue> {
        self.puzzle.clues_for(Direction::Down)
    }

    pub fn clue_number_at(&self, row: usize, col: usize) -> Option<&'static str> {
        self.puzzle.clue_number_at(Pos::new(row, col))
    }

    /// Clue for the selected cell in the current direction
    pub fn active_clue(&self) -> Option<&Clue> {
        self.puzzle.word_at(self.selected?, self.direction)
    }

    /// Open cell sharing the selected row (across) or column (down)
    pub fn is_highlighted(&self, row: usize, col: usize) -> bool {
        if self.puzzle.is_black(Pos::new(row, col)) {
            return false;
        }
        match (self.selected, self.direction) {
            (Some(sel), Direction::Across) => sel.row == row,
            (Some(sel), Direction::Down) => sel.col == col,
            (None, _) => false,
        }
    }

    // === Timer ===

    fn current_elapsed(&self) -> i64 {
        if self.completed {
            return self.solve_ms;
        }
        match self.timer_origin {
            Some(origin) => (self.platform.now_ms() - origin).max(0),
            None => self.elapsed_ms,
        }
    }

    fn start_timer(&mut self) {
        if self.completed || self.timer_origin.is_some() {
            return;
        }
        self.timer_origin = Some(self.platform.now_ms() - self.elapsed_ms);
    }

    fn stop_timer(&mut self) {
        self.elapsed_ms = self.current_elapsed();
        self.timer_origin = None;
    }

    /// Start/Resume button
    pub fn start(&mut self) {
        self.start_timer();
    }

    /// Display tick; does nothing once solved or while paused
    pub fn refresh_elapsed(&mut self) {
        if !self.completed && self.timer_origin.is_some() {
            self.elapsed_ms = self.current_elapsed();
        }
    }

    /// `MM:SS` for the header clock
    pub fn display_time(&self) -> String {
        if self.completed {
            crate::format_time(self.solve_ms)
        } else {
            crate::format_time(self.elapsed_ms)
        }
    }

    // === Input ===

    /// Tap a cell: selects it, or flips direction if already selected.
    /// Black squares and out-of-range cells are ignored.
    pub fn select_cell(&mut self, row: usize, col: usize) {
        let pos = Pos::new(row, col);
        if !self.puzzle.is_open(pos) {
            return;
        }
        self.start_timer();
        if self.selected == Some(pos) {
            self.direction = self.direction.opposite();
        } else {
            self.selected = Some(pos);
        }
    }

    /// Write a letter into the selected cell and move the cursor on
    pub fn type_letter(&mut self, letter: char) {
        if !letter.is_ascii_alphabetic() || self.completed {
            return;
        }
        let Some(pos) = self.selected else {
            return;
        };
        if !self.puzzle.is_open(pos) {
            return;
        }

        self.grid.set(pos, Cell::Letter(letter.to_ascii_uppercase()));
        self.errors.clear(pos);
        self.save_partial();
        self.check_completion();

        let next = cursor::advance(
            self.puzzle,
            &self.grid,
            Cursor {
                pos,
                direction: self.direction,
            },
        );
        self.selected = Some(next.pos);
        self.direction = next.direction;
    }

    /// Clear the selected cell, or step back one cell and clear that
    pub fn backspace(&mut self) {
        if self.completed {
            return;
        }
        let Some(pos) = self.selected else {
            return;
        };

        let target = if self.grid.get(pos).letter().is_some() {
            pos
        } else {
            let back = Cursor {
                pos,
                direction: self.direction,
            };
            let Some(prev) = cursor::step_back(self.puzzle, back) else {
                return;
            };
            self.selected = Some(prev);
            prev
        };
        self.grid.set(target, Cell::Empty);
        self.errors.clear(target);
        self.save_partial();
    }

    // === Menu ===

    /// Flag wrong letters. Empty cells are never flagged.
    pub fn check_puzzle(&mut self) {
        self.errors = ErrorMarks::check(&self.grid, self.puzzle);
        log::debug!("Check found {} wrong letters", self.errors.count());
    }

    /// Fill the selected cell with its answer (counts as a hint)
    pub fn reveal_letter(&mut self) {
        if self.completed {
            return;
        }
        let Some(pos) = self.selected else {
            return;
        };
        let Some(answer) = self.puzzle.answer(pos) else {
            return;
        };
        self.grid.set(pos, Cell::Letter(answer));
        self.errors.clear(pos);
        self.hints_used += 1;
        self.save_partial();
        self.check_completion();
    }

    /// Show the whole solution. Finishes the puzzle without the bonus.
    pub fn give_up(&mut self) {
        if self.completed {
            return;
        }
        let started_at = self.timer_origin.unwrap_or_else(|| self.platform.now_ms());
        self.solve_ms = self.current_elapsed();
        self.stop_timer();
        self.grid = PlayerGrid::solved(self.puzzle);
        self.errors = ErrorMarks::default();
        self.hints_used += 1;
        self.completed = true;
        log::info!("Gave up on {} after {}", self.puzzle.date, crate::format_time(self.solve_ms));

        let record = CrosswordResult::finished(
            self.puzzle.date,
            self.solve_ms,
            started_at,
            self.hints_used,
        );
        result::save_result(self.platform.store.as_ref(), &record);
    }

    /// True once every open cell holds its answer. The first time that
    /// happens the timer freezes, the result is saved and the bonus paid.
    pub fn check_completion(&mut self) -> bool {
        if self.completed {
            return true;
        }
        if !self.grid.is_solved(self.puzzle) {
            return false;
        }

        let started_at = self.timer_origin.unwrap_or_else(|| self.platform.now_ms());
        self.solve_ms = self.current_elapsed();
        self.stop_timer();
        self.completed = true;
        log::info!(
            "Solved {} in {} with {} hints",
            self.puzzle.date,
            crate::format_time(self.solve_ms),
            self.hints_used
        );

        let record = CrosswordResult::finished(
            self.puzzle.date,
            self.solve_ms,
            started_at,
            self.hints_used,
        );
        result::save_result(self.platform.store.as_ref(), &record);
        self.host.on_points_earned(self.bonus);
        self.host.on_celebrate();
        true
    }

    fn save_partial(&self) {
        if self.completed {
            return;
        }
        let record = CrosswordResult::partial(
            self.puzzle.date,
            self.grid.clone(),
            self.current_elapsed(),
            self.hints_used,
        );
        result::save_result(self.platform.store.as_ref(), &record);
    }

    // === Tabs ===

    pub fn show_puzzle_tab(&mut self) {
        self.tab = Tab::Puzzle;
    }

    /// Switch to the leaderboard. Enough clicks in one session wipe today's
    /// result and start the puzzle over (0 disables this).
    pub fn click_leaderboard_tab(&mut self) {
        self.tab = Tab::Leaderboard;
        self.leaderboard_clicks += 1;
        if self.secret_restart_clicks > 0 && self.leaderboard_clicks >= self.secret_restart_clicks {
            self.restart();
        }
    }

    fn restart(&mut self) {
        log::warn!("Restarting {} from scratch", self.puzzle.date);
        result::clear_result(self.platform.store.as_ref(), self.puzzle.date);
        self.grid = PlayerGrid::blank(self.puzzle);
        self.errors = ErrorMarks::default();
        self.selected = None;
        self.direction = Direction::Across;
        self.completed = false;
        self.solve_ms = 0;
        self.elapsed_ms = 0;
        self.hints_used = 0;
        self.timer_origin = None;
        self.leaderboard_clicks = 0;
    }

    /// Friends plus the player once solved
    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::new(self.completed.then_some(self.solve_ms))
    }

    /// Leave the screen: flush progress, stop the timer, hand back to the host
    pub fn close(&mut self) {
        if !self.completed && self.timer_origin.is_some() {
            self.save_partial();
        }
        self.stop_timer();
        self.host.on_back();
    }
}
