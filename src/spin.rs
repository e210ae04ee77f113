//! Reward wheel: weighted payout, wheel landing maths, persisted cooldown
//!
//! The payout is decided first by [`pick_reward`]; the segment the wheel stops
//! on is only chosen afterwards to match it.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::persistence::{self, SPIN_LAST_TIMESTAMP_KEY};
use crate::platform::Platform;
use crate::settings::Settings;

/// Possible wheel payouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinReward {
    Jackpot,
    Big,
    Small,
    Nothing,
}

impl SpinReward {
    pub const ALL: [SpinReward; 4] = [
        SpinReward::Jackpot,
        SpinReward::Big,
        SpinReward::Small,
        SpinReward::Nothing,
    ];

    pub fn points(self) -> u32 {
        match self {
            SpinReward::Jackpot => 100,
            SpinReward::Big => 50,
            SpinReward::Small => 10,
            SpinReward::Nothing => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpinReward::Jackpot => "100 pts",
            SpinReward::Big => "50 pts",
            SpinReward::Small => "10 pts",
            SpinReward::Nothing => "Try Again",
        }
    }
}

/// Wheel layout, clockwise from the pointer
pub const SEGMENTS: [SpinReward; 8] = [
    SpinReward::Jackpot,
    SpinReward::Small,
    SpinReward::Big,
    SpinReward::Small,
    SpinReward::Big,
    SpinReward::Small,
    SpinReward::Nothing,
    SpinReward::Small,
];

pub const SEGMENT_COUNT: usize = SEGMENTS.len();
pub const SEGMENT_ANGLE: f64 = 360.0 / SEGMENT_COUNT as f64;

/// Extra full turns added to every spin (inclusive range)
pub const MIN_SPINS: u32 = 5;
pub const MAX_SPINS: u32 = 8;

/// Map a uniform draw in `[0, 1)` to a payout: 10% / 30% / 50% / 10%
pub fn reward_for_draw(r: f64) -> SpinReward {
    if r < 0.10 {
        SpinReward::Jackpot
    } else if r < 0.40 {
        SpinReward::Big
    } else if r < 0.90 {
        SpinReward::Small
    } else {
        SpinReward::Nothing
    }
}

pub fn pick_reward<R: Rng + ?Sized>(rng: &mut R) -> SpinReward {
    reward_for_draw(rng.random::<f64>())
}

/// Uniformly pick a wheel slot paying `reward`
pub fn segment_index_for_reward<R: Rng + ?Sized>(reward: SpinReward, rng: &mut R) -> usize {
    let matching: Vec<usize> = SEGMENTS
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == reward)
        .map(|(i, _)| i)
        .collect();
    debug_assert!(!matching.is_empty(), "every reward has a slot");
    matching[rng.random_range(0..matching.len())]
}

/// Final wheel rotation (degrees) that brings `index` under the pointer
pub fn rotation_for_segment_with_spins(index: usize, current_rotation: f64, spins: u32) -> f64 {
    let target_angle = index as f64 * SEGMENT_ANGLE + SEGMENT_ANGLE / 2.0;
    current_rotation + spins as f64 * 360.0 + (360.0 - target_angle)
}

pub fn rotation_for_segment<R: Rng + ?Sized>(
    index: usize,
    current_rotation: f64,
    rng: &mut R,
) -> f64 {
    let spins = rng.random_range(MIN_SPINS..=MAX_SPINS);
    rotation_for_segment_with_spins(index, current_rotation, spins)
}

/// Segment under the pointer for a given wheel rotation
pub fn segment_at_rotation(rotation: f64) -> usize {
    let pointer = (360.0 - rotation.rem_euclid(360.0)).rem_euclid(360.0);
    (pointer / SEGMENT_ANGLE).floor() as usize % SEGMENT_COUNT
}

/// Persisted last-spin instant and the cooldown derived from it
#[derive(Debug, Clone)]
pub struct SpinCooldown {
    platform: Platform,
    cooldown_ms: i64,
}

impl SpinCooldown {
    pub fn new(platform: Platform, cooldown_ms: i64) -> Self {
        Self {
            platform,
            cooldown_ms,
        }
    }

    pub fn last_spin_ms(&self) -> Option<i64> {
        persistence::load(self.platform.store.as_ref(), SPIN_LAST_TIMESTAMP_KEY)
    }

    pub fn record_spin(&self) {
        let now = self.platform.now_ms();
        persistence::save(self.platform.store.as_ref(), SPIN_LAST_TIMESTAMP_KEY, &now);
    }

    pub fn cooldown_remaining_ms(&self) -> i64 {
        match self.last_spin_ms() {
            Some(last) => {
                let elapsed = self.platform.now_ms() - last;
                (self.cooldown_ms - elapsed).clamp(0, self.cooldown_ms)
            }
            None => 0,
        }
    }

    pub fn can_spin(&self) -> bool {
        self.cooldown_remaining_ms() == 0
    }
}

/// Wheel screen phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    /// Waiting for the spin button
    Idle,
    /// Reward drawn, waiting for the player to confirm
    Confirming,
    /// Wheel animating toward its final rotation
    Spinning,
    /// Spin recorded, payout shown
    Result,
}

/// Where the wheel will land, for the host's animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub reward: SpinReward,
    pub segment: usize,
    pub rotation: f64,
}

/// Wheel session driven by the host's buttons and animation end
pub struct SpinWheel<H: Host> {
    cooldown: SpinCooldown,
    host: H,
    rng: Pcg32,
    phase: SpinPhase,
    pending: Option<SpinReward>,
    earned: Option<SpinReward>,
    rotation: f64,
}

impl<H: Host> SpinWheel<H> {
    pub fn new(platform: Platform, host: H) -> Self {
        let seed = platform.now_ms() as u64;
        let settings = Settings::load(platform.store.as_ref());
        Self::with_seed(platform, host, &settings, seed)
    }

    pub fn with_seed(platform: Platform, host: H, settings: &Settings, seed: u64) -> Self {
        Self {
            cooldown: SpinCooldown::new(platform, settings.spin_cooldown_ms),
            host,
            rng: Pcg32::seed_from_u64(seed),
            phase: SpinPhase::Idle,
            pending: None,
            earned: None,
            rotation: 0.0,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn pending_reward(&self) -> Option<SpinReward> {
        self.pending
    }

    pub fn earned_reward(&self) -> Option<SpinReward> {
        self.earned
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn can_spin(&self) -> bool {
        self.cooldown.can_spin()
    }

    pub fn cooldown_remaining_ms(&self) -> i64 {
        self.cooldown.cooldown_remaining_ms()
    }

    /// Countdown text for the locked wheel
    pub fn countdown_label(&self) -> String {
        crate::format_countdown(self.cooldown_remaining_ms())
    }

    /// Spin button: draws the payout. Ignored while cooling down or mid-spin.
    pub fn press_spin(&mut self) -> Option<SpinReward> {
        if self.phase != SpinPhase::Idle || !self.can_spin() {
            return None;
        }
        let reward = pick_reward(&mut self.rng);
        log::debug!("Spin drawn: {reward:?}");
        self.pending = Some(reward);
        self.phase = SpinPhase::Confirming;
        Some(reward)
    }

    /// Confirm button: plans the landing and starts the animation
    pub fn confirm(&mut self) -> Option<SpinPlan> {
        if self.phase != SpinPhase::Confirming {
            return None;
        }
        let reward = self.pending?;
        let segment = segment_index_for_reward(reward, &mut self.rng);
        let rotation = rotation_for_segment(segment, self.rotation, &mut self.rng);
        self.rotation = rotation;
        self.phase = SpinPhase::Spinning;
        Some(SpinPlan {
            reward,
            segment,
            rotation,
        })
    }

    /// Animation finished: record the spin, then pay out
    pub fn finish_spin(&mut self) -> Option<SpinReward> {
        if self.phase != SpinPhase::Spinning {
            return None;
        }
        let reward = self.pending.take()?;
        self.cooldown.record_spin();
        if reward.points() > 0 {
            self.host.on_points_earned(reward.points());
            self.host.on_celebrate();
        }
        log::info!("Spin finished: {} points", reward.points());
        self.earned = Some(reward);
        self.phase = SpinPhase::Result;
        Some(reward)
    }

    /// Back to the idle wheel (still locked if cooling down)
    pub fn spin_again(&mut self) {
        if self.phase != SpinPhase::Result {
            return;
        }
        self.pending = None;
        self.earned = None;
        self.phase = SpinPhase::Idle;
    }

    /// Result screen's primary button: spin again if allowed, otherwise leave
    pub fn primary_action(&mut self) {
        if self.can_spin() {
            self.spin_again();
        } else {
            self.close();
        }
    }

    pub fn close(&mut self) {
        self.host.on_back();
    }
}
