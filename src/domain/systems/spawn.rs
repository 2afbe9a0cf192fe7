// Enemy spawn placement. The real-time timer that drives it lives with the session task.

use crate::domain::geometry::Stage;
use crate::domain::store::EntityStore;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

pub struct SpawnScheduler {
    /// Real-time period between spawns, independent of the frame clock.
    pub interval: Duration,
    stage_width: u32,
    rng: ChaCha8Rng,
}

impl SpawnScheduler {
    /// Same seed = same sequence of spawn columns.
    pub fn seeded(interval: Duration, stage: Stage, seed: u64) -> Self {
        Self {
            interval,
            stage_width: stage.width,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy(interval: Duration, stage: Stage) -> Self {
        Self {
            interval,
            stage_width: stage.width,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform integer column in `[0, stage_width]`, both ends inclusive.
    pub fn next_x(&mut self) -> f32 {
        self.rng.gen_range(0..=self.stage_width) as f32
    }

    /// Appends one enemy; safe to call between any two ticks.
    pub fn spawn(&mut self, store: &mut EntityStore) -> u64 {
        let x = self.next_x();
        store.spawn_enemy(x)
    }
}
