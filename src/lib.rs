//! Pera Arcade - mini-game engines for the wallet prototype
//!
//! Core modules:
//! - `sim`: Deterministic brick-breaker simulation (physics, collisions, phases)
//! - `brickbreaker`: Host-facing brick-breaker session with its play cooldown
//! - `crossword`: Daily 5x5 mini crossword (grid, cursor, completion, progress)
//! - `leaderboard`: Crossword solve times
//! - `spin`: Reward wheel probability and cooldown
//! - `platform`: Clock and key-value storage abstraction
//! - `persistence`: Best-effort JSON records on top of the store
//! - `settings`: Data-driven tunables

pub mod brickbreaker;
pub mod crossword;
pub mod host;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod spin;

pub use brickbreaker::BrickBreakerSession;
pub use crossword::CrosswordSession;
pub use host::Host;
pub use platform::Platform;
pub use settings::Settings;
pub use spin::SpinWheel;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration; level speeds are expressed per 60 Hz frame
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 320.0;
    pub const FIELD_HEIGHT: f32 = 420.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_Y: f32 = FIELD_HEIGHT - 52.0;
    /// Paddle speed (pixels per frame while a direction is held)
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Maximum bounce angle off the paddle, from vertical
    pub const PADDLE_MAX_BOUNCE_DEG: f32 = 65.0;

    /// Brick grid layout
    pub const BRICK_COLUMNS: usize = 8;
    pub const BRICK_WIDTH: f32 = 35.0;
    pub const BRICK_HEIGHT: f32 = 18.0;
    pub const BRICK_GAP: f32 = 4.0;
    pub const BRICK_TOP: f32 = 44.0;
    /// Left edge of the first column (grid is centred horizontally)
    pub const BRICK_LEFT: f32 = 6.0;

    pub const START_LIVES: u8 = 3;

    pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
}

/// Format milliseconds as `HH:MM:SS` (cooldown countdowns)
pub fn format_countdown(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Format milliseconds as `MM:SS` (solve times)
pub fn format_time(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_grid_is_centred() {
        use consts::*;
        let grid_width = BRICK_COLUMNS as f32 * (BRICK_WIDTH + BRICK_GAP) - BRICK_GAP;
        let expected = ((FIELD_WIDTH - grid_width) / 2.0).round();
        assert_eq!(BRICK_LEFT, expected);
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(consts::DAY_MS - 1), "23:59:59");
        assert_eq!(format_countdown(3_725_000), "01:02:05");
        assert_eq!(format_countdown(-5), "00:00:00");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(95_000), "01:35");
        assert_eq!(format_time(999), "00:00");
    }
}
