//! Built-in [`SimulationClock`] implementations.

use std::time::{Duration, Instant};

use crate::arena_interface::SimulationClock;

/// Reports the same elapsed time on every step without waiting.
///
/// Deterministic, meant for tests and offline simulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep(pub Duration);

impl SimulationClock for FixedStep {
    fn next_step(&mut self) -> Duration {
        self.0
    }
}

/// Wall clock paced to a target step length.
///
/// Each call sleeps until at least `target` has passed since the previous step, then reports
/// the time actually measured, which may be longer.
#[derive(Debug)]
pub struct RealTimeClock {
    target: Duration,
    last: Instant,
}

impl RealTimeClock {
    /// A clock ticking roughly every `target`.
    pub fn new(target: Duration) -> RealTimeClock {
        RealTimeClock {
            target,
            last: Instant::now(),
        }
    }

    /// A clock ticking `fps` times per second.
    pub fn with_fps(fps: u32) -> RealTimeClock {
        RealTimeClock::new(Duration::from_secs(1) / fps.max(1))
    }
}

impl SimulationClock for RealTimeClock {
    fn next_step(&mut self) -> Duration {
        let since_last = self.last.elapsed();
        if since_last < self.target {
            std::thread::sleep(self.target - since_last);
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}
