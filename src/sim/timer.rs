//! Cancellable single-shot timers for the timed phases
//!
//! Timers are advanced by the simulation tick, never by a wall clock, so a
//! replay with the same inputs fires them on the same ticks. Every phase
//! change cancels everything that is pending.

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Release the ball resting on the paddle
    Launch { respawn: bool },
    /// End of the "life lost" pause: ball back on the paddle, resume play
    Respawn,
    /// End of the "level clear" pause
    NextLevel,
}

/// Handle for cancelling one timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    remaining_ms: f32,
    action: TimerAction,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: Vec<Timer>,
    next_id: u32,
}

impl Timers {
    pub fn schedule(&mut self, action: TimerAction, delay_ms: f32) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Timer {
            handle,
            remaining_ms: delay_ms.max(0.0),
            action,
        });
        handle
    }

    /// Returns false if the timer already fired or was cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_scheduled(&self, action: TimerAction) -> bool {
        self.pending.iter().any(|t| t.action == action)
    }

    /// Count down every pending timer
    pub fn elapse(&mut self, dt_ms: f32) {
        for timer in &mut self.pending {
            timer.remaining_ms -= dt_ms;
        }
    }

    /// Remove and return the most overdue timer, if any is due
    ///
    /// Callers pop one at a time so an action that cancels the rest (by
    /// changing phase) also stops them from firing in the same tick.
    pub fn take_due(&mut self) -> Option<TimerAction> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.remaining_ms <= 0.0)
            .min_by(|(_, a), (_, b)| a.remaining_ms.total_cmp(&b.remaining_ms))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx).action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = Timers::default();
        timers.schedule(TimerAction::NextLevel, 100.0);
        timers.elapse(60.0);
        assert_eq!(timers.take_due(), None);
        timers.elapse(40.0);
        assert_eq!(timers.take_due(), Some(TimerAction::NextLevel));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = Timers::default();
        let h = timers.schedule(TimerAction::Respawn, 10.0);
        assert!(timers.cancel(h));
        assert!(!timers.cancel(h));
        timers.elapse(100.0);
        assert_eq!(timers.take_due(), None);
    }

    #[test]
    fn test_most_overdue_fires_first() {
        let mut timers = Timers::default();
        timers.schedule(TimerAction::Launch { respawn: false }, 50.0);
        timers.schedule(TimerAction::Respawn, 10.0);
        timers.elapse(60.0);
        assert_eq!(timers.take_due(), Some(TimerAction::Respawn));
        assert_eq!(timers.take_due(), Some(TimerAction::Launch { respawn: false }));
    }
}
