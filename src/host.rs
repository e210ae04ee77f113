//! Callbacks into the host UI
//!
//! The engines never compute navigation or draw anything; these are the only
//! calls they make outward.

pub trait Host {
    /// Points were earned (level clear, puzzle solved, non-zero spin)
    fn on_points_earned(&mut self, points: u32);

    /// The user exited, or a terminal phase's primary action fired
    fn on_back(&mut self);

    /// Play a celebratory effect (confetti)
    fn on_celebrate(&mut self) {}
}

/// Host that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl Host for NullHost {
    fn on_points_earned(&mut self, _points: u32) {}
    fn on_back(&mut self) {}
}

/// Host that records every callback (tests, headless demo)
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub points: Vec<u32>,
    pub backs: u32,
    pub celebrations: u32,
}

impl RecordingHost {
    pub fn total_points(&self) -> u32 {
        self.points.iter().sum()
    }
}

impl Host for RecordingHost {
    fn on_points_earned(&mut self, points: u32) {
        self.points.push(points);
    }

    fn on_back(&mut self) {
        self.backs += 1;
    }

    fn on_celebrate(&mut self) {
        self.celebrations += 1;
    }
}
