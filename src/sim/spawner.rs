//! Interval-gated block spawner
//!
//! Rolls from its own seeded PCG stream so a run is reproducible from the
//! seed plus the sequence of clock readings.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::state::BlockColor;

/// Spawns one block per elapsed interval
#[derive(Debug, Clone, Serialize)]
pub struct Spawner {
    pub seed: u64,
    /// Seconds between spawns
    pub interval: f64,
    /// Clock reading of the last spawn (or of game start)
    pub last_spawn: f64,
    /// Not part of snapshots
    #[serde(skip)]
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64, interval: f64, start_time: f64) -> Self {
        Self {
            seed,
            interval,
            last_spawn: start_time,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Returns spawn parameters if a full interval has passed since the last spawn
    ///
    /// At most one block per call, however long the gap.
    pub fn poll(&mut self, now: f64) -> Option<(f32, BlockColor)> {
        if now - self.last_spawn < self.interval {
            return None;
        }
        self.last_spawn = now;
        Some(self.roll())
    }

    /// Roll an x position in [-3.5, 2.0) and a color
    pub fn roll(&mut self) -> (f32, BlockColor) {
        let r: i32 = self.rng.random_range(0..550);
        let x = (r - 350) as f32 / 100.0;
        let color = BlockColor::from_index(self.rng.random_range(0..3));
        (x, color)
    }
}
