//! Deterministic brick-breaker simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (bricks row-major)
//! - No rendering, storage or clock dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{BrickContact, Side, ball_brick_collision};
pub use level::{LEVELS, Level, generate_bricks};
pub use state::{Ball, Brick, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use timer::{TimerAction, TimerHandle, Timers};
