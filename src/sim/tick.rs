//! Simulation tick
//!
//! `tick` advances the game by `dt_ms`. One call per display frame; motion is
//! expressed per 60 Hz frame and scaled by `dt_ms / FRAME_MS`.

use super::collision::{
    ball_brick_collision, bounce_off_walls, paddle_bounce, resolve_brick_contact,
};
use super::level::Level;
use super::state::{Ball, GameEvent, GamePhase, GameState};
use super::timer::TimerAction;
use crate::consts::*;

/// Held-direction flags for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by `dt_ms`
///
/// Fires due timers first, then (if playing) steps the physics. Phases other
/// than the three active ones are inert.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.phase.is_active() {
        return events;
    }

    state.time_ticks += 1;

    state.timers.elapse(dt_ms);
    while let Some(action) = state.timers.take_due() {
        fire_timer(state, action, &mut events);
    }

    if state.phase == GamePhase::Playing {
        step_physics(state, input, dt_ms / FRAME_MS, &mut events);
    }

    events
}

fn fire_timer(state: &mut GameState, action: TimerAction, events: &mut Vec<GameEvent>) {
    match action {
        TimerAction::Launch { respawn } => {
            debug_assert_eq!(state.phase, GamePhase::Playing);
            state.launch(respawn, events);
        }
        TimerAction::Respawn => {
            debug_assert_eq!(state.phase, GamePhase::LostLife);
            state.respawn(events);
        }
        TimerAction::NextLevel => {
            debug_assert_eq!(state.phase, GamePhase::LevelComplete);
            if state.is_last_level() {
                log::info!("All levels cleared, final score {}", state.score);
                state.set_phase(GamePhase::Victory, events);
            } else {
                state.paddle_x = FIELD_WIDTH / 2.0;
                state.set_phase(GamePhase::Playing, events);
                let next = state.level_index + 1;
                state.begin_level(next, events);
            }
        }
    }
}

/// One physics step; `step` is the number of reference frames elapsed
fn step_physics(state: &mut GameState, input: &TickInput, step: f32, events: &mut Vec<GameEvent>) {
    let paddle_width = state.paddle_width();
    let half = paddle_width / 2.0;

    // Paddle
    if input.left {
        state.paddle_x = (state.paddle_x - PADDLE_SPEED * step).max(half);
    }
    if input.right {
        state.paddle_x = (state.paddle_x + PADDLE_SPEED * step).min(FIELD_WIDTH - half);
    }

    if !state.ball.launched {
        state.ball.pos = Ball::rest_position(state.paddle_x);
        return;
    }

    let ball = &mut state.ball;
    ball.pos += ball.vel * step;
    bounce_off_walls(ball);
    paddle_bounce(ball, state.paddle_x, paddle_width, step);

    // First live brick hit wins; one brick per step
    let hit = state.bricks.iter().enumerate().find_map(|(i, brick)| {
        if !brick.is_alive() {
            return None;
        }
        ball_brick_collision(ball.pos, ball.radius, brick).map(|contact| (i, contact))
    });
    if let Some((index, contact)) = hit {
        let brick = &mut state.bricks[index];
        resolve_brick_contact(ball, brick, contact.side);
        brick.hp -= 1;
        let destroyed = !brick.is_alive();
        if destroyed {
            state.bricks_destroyed += 1;
        }
        events.push(GameEvent::BrickHit { index, destroyed });
    }

    // Ball fell out the bottom
    if state.ball.pos.y - state.ball.radius > FIELD_HEIGHT {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        if state.lives == 0 {
            log::info!(
                "Game over on level {} with {} points",
                state.level_index + 1,
                state.score
            );
            state.set_phase(GamePhase::GameOver, events);
        } else {
            state.set_phase(GamePhase::LostLife, events);
            state
                .timers
                .schedule(TimerAction::Respawn, state.timings.lost_life_ms);
        }
        return;
    }

    if state.all_bricks_cleared() {
        let points = Level::clear_bonus(state.level_index);
        state.score += points;
        events.push(GameEvent::LevelCleared {
            level: state.level_index,
            points,
        });
        state.set_phase(GamePhase::LevelComplete, events);
        state
            .timers
            .schedule(TimerAction::NextLevel, state.timings.level_complete_ms);
    }
}
