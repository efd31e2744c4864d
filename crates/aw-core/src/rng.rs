//! Deterministic RNG for scene generation.
//!
//! The simulation itself is fully deterministic and never draws random
//! numbers.  `SceneRng` exists for drivers and tests that want to scatter
//! agents and obstacles reproducibly: the same seed always produces the same
//! layout.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::WorldPos;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG for laying out scenes.
pub struct SceneRng(SmallRng);

impl SceneRng {
    pub fn new(seed: u64) -> Self {
        SceneRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream, e.g. one for obstacles and one for
    /// agents, so adding obstacles does not shift agent positions.
    pub fn child(&mut self, offset: u64) -> SceneRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SceneRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A uniformly random world position inside the square `[-half, half)²`.
    pub fn world_pos(&mut self, half: f32) -> WorldPos {
        WorldPos::new(self.gen_range(-half..half), self.gen_range(-half..half))
    }
}
