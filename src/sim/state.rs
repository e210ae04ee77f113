//! Game state and core simulation types
//!
//! Everything a brick-breaker session mutates lives here, including its RNG,
//! so the tick function stays pure given its arguments.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::{LEVELS, generate_bricks, level};
use super::timer::{TimerAction, Timers};
use crate::consts::*;
use crate::settings::PhaseTimings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// A session was played within the cooldown window
    Cooldown,
    /// Waiting for the Play button
    Intro,
    /// Active gameplay (the ball may still be resting on the paddle)
    Playing,
    /// Brief pause after the ball dropped, before it respawns
    LostLife,
    /// Brief pause after the last brick broke
    LevelComplete,
    /// No lives left
    GameOver,
    /// All levels cleared
    Victory,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }

    /// Phases during which the session counts as running
    pub fn is_active(self) -> bool {
        matches!(
            self,
            GamePhase::Playing | GamePhase::LostLife | GamePhase::LevelComplete
        )
    }
}

/// Things that happened during a tick, for the host and the HUD
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    BallLaunched,
    BrickHit { index: usize, destroyed: bool },
    LifeLost { remaining: u8 },
    LevelCleared { level: usize, points: u32 },
    LevelStarted { level: usize },
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    /// False while resting on the paddle
    pub launched: bool,
}

impl Ball {
    pub fn resting_on(paddle_x: f32) -> Self {
        Self {
            pos: Self::rest_position(paddle_x),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            launched: false,
        }
    }

    /// Top-centre of the paddle
    #[inline]
    pub fn rest_position(paddle_x: f32) -> Vec2 {
        Vec2::new(paddle_x, PADDLE_Y - BALL_RADIUS - 1.0)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A brick
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub hp: u8,
    pub max_hp: u8,
}

impl Brick {
    pub fn new(x: f32, y: f32, hp: u8) -> Self {
        Self { x, y, hp, max_hp: hp }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Remaining strength in `(0, 1]`, for shading
    pub fn health(&self) -> f32 {
        self.hp as f32 / self.max_hp.max(1) as f32
    }

    pub fn right(&self) -> f32 {
        self.x + BRICK_WIDTH
    }

    pub fn bottom(&self) -> f32 {
        self.y + BRICK_HEIGHT
    }
}

/// Complete brick-breaker state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Current level index (0-based)
    pub level_index: usize,
    pub lives: u8,
    pub score: u32,
    /// Paddle centre x
    pub paddle_x: f32,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    /// Bricks destroyed in the current level
    pub bricks_destroyed: usize,
    /// Pending timed-phase callbacks
    pub timers: Timers,
    pub timings: PhaseTimings,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// New session waiting on the intro screen, level 1 shown as a preview
    pub fn new(seed: u64, timings: PhaseTimings) -> Self {
        let paddle_x = FIELD_WIDTH / 2.0;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Intro,
            level_index: 0,
            lives: START_LIVES,
            score: 0,
            paddle_x,
            ball: Ball::resting_on(paddle_x),
            bricks: generate_bricks(0),
            bricks_destroyed: 0,
            timers: Timers::default(),
            timings,
            time_ticks: 0,
        }
    }

    pub fn level(&self) -> &'static super::level::Level {
        level(self.level_index)
    }

    pub fn paddle_width(&self) -> f32 {
        self.level().paddle_width
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= LEVELS.len()
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }

    pub fn all_bricks_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_alive())
    }

    /// Change phase, cancelling every pending timer
    pub fn set_phase(&mut self, phase: GamePhase, events: &mut Vec<GameEvent>) {
        if self.phase == phase {
            return;
        }
        self.timers.cancel_all();
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        events.push(GameEvent::PhaseChanged {
            from: self.phase,
            to: phase,
        });
        self.phase = phase;
    }

    /// Play pressed: level 1, full lives, zero score
    pub fn start(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.lives = START_LIVES;
        self.score = 0;
        self.paddle_x = FIELD_WIDTH / 2.0;
        self.set_phase(GamePhase::Playing, &mut events);
        self.begin_level(0, &mut events);
        events
    }

    /// Fresh grid for a level; the ball waits on the paddle before launching
    pub(crate) fn begin_level(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        debug_assert!(index < LEVELS.len());
        self.level_index = index;
        self.bricks = generate_bricks(index);
        self.bricks_destroyed = 0;
        self.ball = Ball::resting_on(self.paddle_x);
        self.timers.schedule(
            TimerAction::Launch { respawn: false },
            self.timings.level_launch_ms,
        );
        events.push(GameEvent::LevelStarted { level: index });
    }

    /// Ball back on the paddle after a lost life
    pub(crate) fn respawn(&mut self, events: &mut Vec<GameEvent>) {
        self.ball = Ball::resting_on(self.paddle_x);
        self.set_phase(GamePhase::Playing, events);
        self.timers.schedule(
            TimerAction::Launch { respawn: true },
            self.timings.respawn_launch_ms,
        );
    }

    /// Release the ball with a small random horizontal component
    pub(crate) fn launch(&mut self, respawn: bool, events: &mut Vec<GameEvent>) {
        let speed = self.level().speed;
        let angle: f32 = self.rng.random_range(-0.2..0.2);
        let vy = if respawn {
            -speed
        } else {
            -speed * (1.0 - angle * angle).sqrt()
        };
        self.ball.vel = Vec2::new(speed * angle, vy);
        self.ball.launched = true;
        events.push(GameEvent::BallLaunched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_intro() {
        let state = GameState::new(1, PhaseTimings::default());
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bricks.len(), 16);
        assert!(!state.ball.launched);
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_start_schedules_launch() {
        let mut state = GameState::new(1, PhaseTimings::default());
        state.score = 99;
        let events = state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.timers.is_scheduled(TimerAction::Launch { respawn: false }));
        assert!(events.contains(&GameEvent::LevelStarted { level: 0 }));
    }

    #[test]
    fn test_phase_change_cancels_timers() {
        let mut state = GameState::new(1, PhaseTimings::default());
        state.start();
        let mut events = Vec::new();
        state.set_phase(GamePhase::GameOver, &mut events);
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_launch_keeps_level_speed() {
        let mut state = GameState::new(5, PhaseTimings::default());
        state.start();
        let mut events = Vec::new();
        state.launch(false, &mut events);
        assert!((state.ball.speed() - 4.0).abs() < 1e-4);
        assert!(state.ball.vel.y < 0.0);
        assert!(state.ball.vel.x.abs() <= 0.2 * 4.0);
    }
}
