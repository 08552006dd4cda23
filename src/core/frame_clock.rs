//! Fixed-rate frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps out whatever is left of each frame's budget, like a
/// `clock.tick(fps)` call at the end of every frame.
#[derive(Debug)]
pub struct FrameClock {
    budget: Duration,
    started: Instant,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            budget: Duration::from_secs(1) / target_fps.max(1),
            started: now,
            last_tick: now,
        }
    }

    /// Time allotted to one frame.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Milliseconds since the clock was created.
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Block until the current frame's budget is spent. Returns the time since
    /// the previous tick, which is longer than the budget if the frame overran.
    pub fn tick(&mut self) -> Duration {
        let spent = self.last_tick.elapsed();
        if spent < self.budget {
            thread::sleep(self.budget - spent);
        }

        let now = Instant::now();
        let frame_time = now - self.last_tick;
        self.last_tick = now;
        frame_time
    }
}
