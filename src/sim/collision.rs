//! Collision detection and response
//!
//! Axis-aligned boxes only: the ball is treated as its bounding square and
//! tested once per step (no swept/continuous test). Level speeds are tuned
//! against exactly this.

use glam::Vec2;

use super::state::{Ball, Brick};
use crate::consts::*;

/// Which face of a brick the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Result of a ball/brick overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickContact {
    pub side: Side,
    /// Overlap along the struck axis
    pub penetration: f32,
}

/// Overlap test between the ball's box and a brick; the struck side is the
/// one with the smallest penetration (ties: left, right, top, bottom)
pub fn ball_brick_collision(pos: Vec2, radius: f32, brick: &Brick) -> Option<BrickContact> {
    if pos.x + radius < brick.x
        || pos.x - radius > brick.right()
        || pos.y + radius < brick.y
        || pos.y - radius > brick.bottom()
    {
        return None;
    }

    let overlaps = [
        (Side::Left, (pos.x + radius) - brick.x),
        (Side::Right, brick.right() - (pos.x - radius)),
        (Side::Top, (pos.y + radius) - brick.y),
        (Side::Bottom, brick.bottom() - (pos.y - radius)),
    ];
    let mut best = overlaps[0];
    for candidate in &overlaps[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    Some(BrickContact {
        side: best.0,
        penetration: best.1,
    })
}

/// Bounce the ball off a brick face and push it just outside
pub fn resolve_brick_contact(ball: &mut Ball, brick: &Brick, side: Side) {
    const SEPARATION: f32 = 0.5;
    match side {
        Side::Left => {
            ball.vel.x = -ball.vel.x.abs();
            ball.pos.x = brick.x - ball.radius - SEPARATION;
        }
        Side::Right => {
            ball.vel.x = ball.vel.x.abs();
            ball.pos.x = brick.right() + ball.radius + SEPARATION;
        }
        Side::Top => {
            ball.vel.y = -ball.vel.y.abs();
            ball.pos.y = brick.y - ball.radius - SEPARATION;
        }
        Side::Bottom => {
            ball.vel.y = ball.vel.y.abs();
            ball.pos.y = brick.bottom() + ball.radius + SEPARATION;
        }
    }
}

/// Reflect off the left, right and top walls. The bottom is open.
pub fn bounce_off_walls(ball: &mut Ball) {
    let r = ball.radius;
    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = ball.vel.x.abs();
    }
    if ball.pos.x + r > FIELD_WIDTH {
        ball.pos.x = FIELD_WIDTH - r;
        ball.vel.x = -ball.vel.x.abs();
    }
    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = ball.vel.y.abs();
    }
}

/// Paddle bounce. Only a descending ball whose bottom edge is inside the
/// paddle band (extended by this step's fall) and that horizontally overlaps
/// the paddle is caught. Outgoing angle depends on where it hit: centre goes
/// straight up, the edges go out at `PADDLE_MAX_BOUNCE_DEG`.
///
/// Returns true if the ball bounced.
pub fn paddle_bounce(ball: &mut Ball, paddle_x: f32, paddle_width: f32, step: f32) -> bool {
    let half = paddle_width / 2.0;
    let left = paddle_x - half;
    let hit_y = ball.pos.y + ball.radius;

    let descending = ball.vel.y > 0.0;
    let in_band =
        hit_y >= PADDLE_Y && hit_y <= PADDLE_Y + PADDLE_HEIGHT + (ball.vel.y * step).abs();
    let over_paddle =
        ball.pos.x >= left - ball.radius && ball.pos.x <= left + paddle_width + ball.radius;
    if !(descending && in_band && over_paddle) {
        return false;
    }

    let offset = ((ball.pos.x - paddle_x) / half).clamp(-1.0, 1.0);
    let angle = offset * PADDLE_MAX_BOUNCE_DEG.to_radians();
    let speed = ball.speed();
    ball.vel = Vec2::new(speed * angle.sin(), -speed * angle.cos());
    ball.pos.y = PADDLE_Y - ball.radius - 1.0;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius: BALL_RADIUS,
            launched: true,
        }
    }

    #[test]
    fn test_hit_from_below_flips_vy() {
        let brick = Brick::new(100.0, 50.0, 1);
        // Ball centre 5px into the brick's bottom band
        let mut ball = ball_at(117.5, brick.bottom() + BALL_RADIUS - 5.0, 1.0, -4.0);
        let contact = ball_brick_collision(ball.pos, ball.radius, &brick).unwrap();
        assert_eq!(contact.side, Side::Bottom);
        assert!((contact.penetration - 5.0).abs() < 1e-4);

        resolve_brick_contact(&mut ball, &brick, contact.side);
        assert!(ball.vel.y > 0.0);
        assert_eq!(ball.vel.x, 1.0);
        assert!(ball_brick_collision(ball.pos, ball.radius, &brick).is_none());
    }

    #[test]
    fn test_hit_from_side_flips_vx() {
        let brick = Brick::new(100.0, 50.0, 1);
        let mut ball = ball_at(100.0 - BALL_RADIUS + 2.0, 59.0, 3.0, 1.0);
        let contact = ball_brick_collision(ball.pos, ball.radius, &brick).unwrap();
        assert_eq!(contact.side, Side::Left);
        resolve_brick_contact(&mut ball, &brick, contact.side);
        assert!(ball.vel.x < 0.0);
        assert_eq!(ball.pos.x, 100.0 - BALL_RADIUS - 0.5);
    }

    #[test]
    fn test_miss() {
        let brick = Brick::new(100.0, 50.0, 1);
        assert!(ball_brick_collision(Vec2::new(50.0, 59.0), BALL_RADIUS, &brick).is_none());
    }

    #[test]
    fn test_walls_never_reflect_bottom() {
        let mut ball = ball_at(-3.0, FIELD_HEIGHT + 50.0, -2.0, 3.0);
        bounce_off_walls(&mut ball);
        assert_eq!(ball.pos.x, BALL_RADIUS);
        assert!(ball.vel.x > 0.0);
        assert!(ball.vel.y > 0.0);

        let mut ball = ball_at(160.0, 2.0, 0.0, -3.0);
        bounce_off_walls(&mut ball);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_paddle_centre_goes_straight_up() {
        let mut ball = ball_at(160.0, PADDLE_Y - BALL_RADIUS + 2.0, 1.0, 4.0);
        let speed = ball.speed();
        assert!(paddle_bounce(&mut ball, 160.0, 90.0, 1.0));
        assert!(ball.vel.x.abs() < 1e-5);
        assert!(ball.vel.y < 0.0);
        assert!((ball.speed() - speed).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_edge_angle_is_capped() {
        // Far past the right end, still within the radius allowance
        let mut ball = ball_at(160.0 + 45.0 + 7.0, PADDLE_Y - BALL_RADIUS + 2.0, 0.0, 4.0);
        assert!(paddle_bounce(&mut ball, 160.0, 90.0, 1.0));
        let angle = ball.vel.x.atan2(-ball.vel.y).to_degrees();
        assert!((angle - PADDLE_MAX_BOUNCE_DEG).abs() < 1e-3);
    }

    #[test]
    fn test_rising_ball_passes_paddle() {
        let mut ball = ball_at(160.0, PADDLE_Y - BALL_RADIUS + 2.0, 0.0, -4.0);
        assert!(!paddle_bounce(&mut ball, 160.0, 90.0, 1.0));
    }
}
