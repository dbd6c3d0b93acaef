//! Time sources for the spawner gate

use std::time::Instant;

/// Monotonic time in seconds
pub trait Clock {
    fn now(&self) -> f64;

    /// Called by the driver once a frame has been simulated and drawn
    fn end_frame(&mut self) {}
}

/// Wall clock, measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Advances a fixed step per frame (headless runs and tests)
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frames: u64,
    frame_rate: f64,
}

impl FrameClock {
    pub fn new(frame_rate: f64) -> Self {
        Self {
            frames: 0,
            frame_rate,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Clock for FrameClock {
    fn now(&self) -> f64 {
        self.frames as f64 / self.frame_rate
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
