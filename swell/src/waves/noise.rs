//! Noise kernel behind every octave.
//!
//! The kernel is `noiz`'s 2D Perlin gradient noise with unit lattice spacing.
//! Its raw output in [-1, 1] is remapped to [0, 1] so octave formulas can
//! subtract 0.5 to centre the surface on zero. Identical seed and input always
//! produce the identical value.

use bevy::math::Vec2;
use noiz::prelude::*;

#[derive(Clone)]
pub struct WaveNoise {
    perlin: Noise<common_noise::Perlin>,
    seed: u32,
}

impl WaveNoise {
    pub fn new(seed: u32) -> Self {
        let mut perlin = Noise::<common_noise::Perlin>::default();
        perlin.set_seed(seed);
        Self { perlin, seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the noise at (x, y), returning a value in [0, 1].
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let raw = self.perlin.sample_for::<f32>(Vec2::new(x, y));
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl Default for WaveNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for WaveNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveNoise").field("seed", &self.seed).finish()
    }
}
