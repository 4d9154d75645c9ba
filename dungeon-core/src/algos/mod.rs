mod dungeon_builder;

pub use dungeon_builder::{DungeonBuilder, DungeonBuilderConfig};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of every random decision taken during generation.
///
/// Anything implementing [`rand::Rng`] is a `RandomSource`, so callers can
/// pass a seeded generator to get reproducible dungeons.
pub trait RandomSource {
    // Inclusive on both ends.
    fn uniform_int(&mut self, min: u32, max: u32) -> u32;

    fn uniform_bool(&mut self, probability_true: f64) -> bool;
}

impl<R: Rng> RandomSource for R {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        self.random_range(min..=max)
    }

    fn uniform_bool(&mut self, probability_true: f64) -> bool {
        self.random_bool(probability_true)
    }
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
