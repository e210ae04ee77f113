//! Wall-clock time source

use std::cell::Cell;

/// Source of the current time in epoch milliseconds
pub trait Clock {
    fn now_ms(&self) -> i64;

    /// Local time minus UTC, in milliseconds
    fn utc_offset_ms(&self) -> i64 {
        0
    }

    /// Current wall-clock time in the player's timezone
    fn local_ms(&self) -> i64 {
        self.now_ms() + self.utc_offset_ms()
    }
}

/// The real clock (`Date.now()` on web, `SystemTime` natively)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    // getTimezoneOffset is in minutes, positive west of UTC
    #[cfg(target_arch = "wasm32")]
    fn utc_offset_ms(&self) -> i64 {
        -(js_sys::Date::new_0().get_timezone_offset() as i64) * 60_000
    }
}

/// Manually driven clock for tests and headless replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
    offset_ms: i64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Cell::new(start_ms),
            offset_ms: 0,
        }
    }

    /// Pretend the player sits `offset_ms` ahead of UTC
    pub fn with_offset(mut self, offset_ms: i64) -> Self {
        self.offset_ms = offset_ms;
        self
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }

    fn utc_offset_ms(&self) -> i64 {
        self.offset_ms
    }
}
