//! Fixed level table and brick grid generation

use super::state::Brick;
use crate::consts::*;

/// Immutable configuration of one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    /// Brick rows (each row has `BRICK_COLUMNS` bricks)
    pub rows: usize,
    /// Ball speed in pixels per frame
    pub speed: f32,
    pub paddle_width: f32,
    /// Hit points per row, top row first
    pub hp_per_row: &'static [u8],
}

impl Level {
    /// Hit points for a row (rows past the table default to 1)
    pub fn hp_for_row(&self, row: usize) -> u8 {
        self.hp_per_row.get(row).copied().unwrap_or(1)
    }

    pub fn brick_count(&self) -> usize {
        self.rows * BRICK_COLUMNS
    }

    /// Points awarded for clearing the level at `index`
    pub fn clear_bonus(index: usize) -> u32 {
        10 * (index as u32 + 1)
    }
}

pub const LEVELS: [Level; 10] = [
    Level {
        rows: 2,
        speed: 4.0,
        paddle_width: 90.0,
        hp_per_row: &[1, 1],
    },
    Level {
        rows: 2,
        speed: 4.5,
        paddle_width: 85.0,
        hp_per_row: &[1, 1],
    },
    Level {
        rows: 3,
        speed: 4.5,
        paddle_width: 80.0,
        hp_per_row: &[1, 1, 1],
    },
    Level {
        rows: 3,
        speed: 5.0,
        paddle_width: 80.0,
        hp_per_row: &[2, 1, 1],
    },
    Level {
        rows: 4,
        speed: 5.0,
        paddle_width: 75.0,
        hp_per_row: &[2, 2, 1, 1],
    },
    Level {
        rows: 4,
        speed: 5.5,
        paddle_width: 70.0,
        hp_per_row: &[2, 2, 2, 1],
    },
    Level {
        rows: 5,
        speed: 5.5,
        paddle_width: 65.0,
        hp_per_row: &[3, 2, 2, 1, 1],
    },
    Level {
        rows: 5,
        speed: 6.0,
        paddle_width: 60.0,
        hp_per_row: &[3, 2, 2, 2, 1],
    },
    Level {
        rows: 6,
        speed: 6.0,
        paddle_width: 55.0,
        hp_per_row: &[3, 3, 2, 2, 1, 1],
    },
    Level {
        rows: 6,
        speed: 6.5,
        paddle_width: 50.0,
        hp_per_row: &[3, 3, 3, 2, 2, 2],
    },
];

/// Level config by index (clamped to the last level)
pub fn level(index: usize) -> &'static Level {
    &LEVELS[index.min(LEVELS.len() - 1)]
}

/// Fresh brick grid for a level, row-major from the top-left
pub fn generate_bricks(index: usize) -> Vec<Brick> {
    let cfg = level(index);
    let mut bricks = Vec::with_capacity(cfg.brick_count());
    for row in 0..cfg.rows {
        let hp = cfg.hp_for_row(row);
        for col in 0..BRICK_COLUMNS {
            bricks.push(Brick::new(
                BRICK_LEFT + col as f32 * (BRICK_WIDTH + BRICK_GAP),
                BRICK_TOP + row as f32 * (BRICK_HEIGHT + BRICK_GAP),
                hp,
            ));
        }
    }
    log::info!(
        "Level {}: {} bricks, speed {}, paddle {}",
        index + 1,
        bricks.len(),
        cfg.speed,
        cfg.paddle_width
    );
    bricks
}
