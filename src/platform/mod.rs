//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (epoch milliseconds)
//! - Storage (LocalStorage on web, in-memory map natively and in tests)

pub mod clock;
pub mod storage;

use std::rc::Rc;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{KeyValueStore, MemoryStore, StorageError};

/// Shared services handed to every game session.
///
/// All engines are single-threaded, so the handles are plain `Rc`s.
#[derive(Clone)]
pub struct Platform {
    pub store: Rc<dyn KeyValueStore>,
    pub clock: Rc<dyn Clock>,
}

impl Platform {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Real clock with the platform's default store
    pub fn system() -> Self {
        Self::new(storage::default_store(), Rc::new(SystemClock))
    }

    /// Current time in epoch milliseconds
    #[inline]
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Current time shifted into the player's timezone
    #[inline]
    pub fn local_ms(&self) -> i64 {
        self.clock.local_ms()
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("now_ms", &self.clock.now_ms())
            .finish_non_exhaustive()
    }
}
