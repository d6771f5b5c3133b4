use tokio::time::Instant;

use crate::models::direction::{Direction, LightPhase};

/// Signal head for one approach. Holds state only; keeping the two groups
/// consistent is the phase scheduler's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalLight {
    pub direction: Direction,
    pub phase: LightPhase,
    pub phase_started_at: Instant,
}

impl DirectionalLight {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            phase: LightPhase::Red,
            phase_started_at: Instant::now(),
        }
    }

    pub fn set_phase(&mut self, phase: LightPhase) {
        self.phase = phase;
        self.phase_started_at = Instant::now();
    }

    pub fn time_in_phase(&self) -> std::time::Duration {
        self.phase_started_at.elapsed()
    }
}
