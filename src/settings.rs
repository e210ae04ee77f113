//! Game tunables
//!
//! Persisted under their own key so a debug build can shorten cooldowns
//! without touching game records.

use serde::{Deserialize, Serialize};

use crate::consts::DAY_MS;
use crate::persistence::{self, SETTINGS_KEY};
use crate::platform::KeyValueStore;

/// Durations of the brick breaker's timed phases (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTimings {
    /// Ball rests on the paddle this long when a level starts
    pub level_launch_ms: f32,
    /// "Life lost" banner before the ball returns
    pub lost_life_ms: f32,
    /// Ball rests on the paddle this long after a respawn
    pub respawn_launch_ms: f32,
    /// "Level clear" banner before the next level
    pub level_complete_ms: f32,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            level_launch_ms: 900.0,
            lost_life_ms: 1300.0,
            respawn_launch_ms: 700.0,
            level_complete_ms: 2000.0,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Cooldowns ===
    /// Wait between brick breaker sessions
    pub brickbreaker_cooldown_ms: i64,
    /// Wait between wheel spins
    pub spin_cooldown_ms: i64,

    // === Rewards ===
    /// Points for solving the daily crossword
    pub crossword_bonus: u32,

    // === Brick breaker ===
    pub timings: PhaseTimings,

    // === Debug ===
    /// Leaderboard tab clicks that wipe today's crossword
    pub secret_restart_clicks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brickbreaker_cooldown_ms: DAY_MS,
            spin_cooldown_ms: DAY_MS,
            crossword_bonus: 50,
            timings: PhaseTimings::default(),
            secret_restart_clicks: 10,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load(store, SETTINGS_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from storage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        persistence::save(store, SETTINGS_KEY, self);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_defaults_when_absent() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let store = MemoryStore::new();
        store
            .set(SETTINGS_KEY, r#"{"spin_cooldown_ms": 60000}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.spin_cooldown_ms, 60_000);
        assert_eq!(settings.crossword_bonus, 50);
        assert_eq!(settings.timings, PhaseTimings::default());
    }

    #[test]
    fn test_save_roundtrip() {
        let store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.secret_restart_clicks = 3;
        settings.save(&store);
        assert_eq!(Settings::load(&store), settings);
    }
}
