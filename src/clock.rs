//! Fixed timestep frame scheduling
//!
//! Converts variable host frame times into a whole number of simulation
//! ticks. Leftover time carries over to the next frame.

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;

/// Accumulator that paces simulation ticks at a fixed rate
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    step: Duration,
    accumulator: Duration,
    max_substeps: u32,
}

impl FrameScheduler {
    pub fn from_fps(fps: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / fps.max(1),
            accumulator: Duration::ZERO,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Length of one tick
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add elapsed real time and return how many ticks to run now.
    ///
    /// At most `MAX_SUBSTEPS` ticks are returned; time beyond that is
    /// dropped so a long stall cannot trigger a spiral of death.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::warn!(
                "Frame scheduler fell behind, dropping {:?}",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Time until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}
