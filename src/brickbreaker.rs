//! Brick-breaker session: the host's handle on the simulation
//!
//! Owns the `GameState`, the persisted play cooldown and the host callbacks.
//! The host calls `update` once per frame and reads the state back for drawing.

use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::persistence::{self, BRICKBREAKER_SESSION_KEY};
use crate::platform::Platform;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Persisted marker of the last session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub started_at: i64,
}

pub struct BrickBreakerSession<H: Host> {
    platform: Platform,
    host: H,
    state: GameState,
    input: TickInput,
    cooldown_ms: i64,
}

impl<H: Host> BrickBreakerSession<H> {
    pub fn new(platform: Platform, host: H) -> Self {
        let seed = platform.now_ms() as u64;
        let settings = Settings::load(platform.store.as_ref());
        Self::with_seed(platform, host, &settings, seed)
    }

    /// Starts in `Cooldown` if a session began within the cooldown window
    pub fn with_seed(platform: Platform, host: H, settings: &Settings, seed: u64) -> Self {
        let mut session = Self {
            platform,
            host,
            state: GameState::new(seed, settings.timings),
            input: TickInput::default(),
            cooldown_ms: settings.brickbreaker_cooldown_ms,
        };
        if session.cooldown_remaining_ms() > 0 {
            log::info!(
                "Brick breaker cooling down for {}",
                crate::format_countdown(session.cooldown_remaining_ms())
            );
            session.state.set_phase(GamePhase::Cooldown, &mut Vec::new());
        }
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn cooldown_remaining_ms(&self) -> i64 {
        let record: Option<SessionRecord> =
            persistence::load(self.platform.store.as_ref(), BRICKBREAKER_SESSION_KEY);
        match record {
            Some(record) => {
                let elapsed = self.platform.now_ms() - record.started_at;
                (self.cooldown_ms - elapsed).clamp(0, self.cooldown_ms)
            }
            None => 0,
        }
    }

    /// Play button. Only honoured on the intro screen.
    pub fn play(&mut self) -> bool {
        if self.state.phase != GamePhase::Intro {
            return false;
        }
        let record = SessionRecord {
            started_at: self.platform.now_ms(),
        };
        persistence::save(self.platform.store.as_ref(), BRICKBREAKER_SESSION_KEY, &record);
        self.input = TickInput::default();
        self.state.start();
        true
    }

    /// Left button pressed/released
    pub fn set_left(&mut self, down: bool) {
        self.input.left = down;
    }

    /// Right button pressed/released
    pub fn set_right(&mut self, down: bool) {
        self.input.right = down;
    }

    /// Advance one frame. Returns the tick's events for HUD effects.
    pub fn update(&mut self, dt_ms: f32) -> Vec<GameEvent> {
        if self.state.phase == GamePhase::Cooldown {
            let mut events = Vec::new();
            if self.cooldown_remaining_ms() == 0 {
                self.state.set_phase(GamePhase::Intro, &mut events);
            }
            return events;
        }

        let events = tick(&mut self.state, &self.input, dt_ms);
        for event in &events {
            if let GameEvent::LevelCleared { level, points } = event {
                log::info!("Level {} cleared: +{} points", level + 1, points);
                self.host.on_points_earned(*points);
            }
        }
        events
    }

    /// Countdown text for the cooldown screen
    pub fn countdown_label(&self) -> String {
        crate::format_countdown(self.cooldown_remaining_ms())
    }

    /// Primary button of the game-over/victory screens
    pub fn primary_action(&mut self) {
        if self.state.phase.is_terminal() {
            self.close();
        }
    }

    /// Leave the screen: stop every pending timer, then hand back to the host
    pub fn close(&mut self) {
        self.state.timers.cancel_all();
        self.input = TickInput::default();
        self.host.on_back();
    }
}
