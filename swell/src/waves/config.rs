//! Octave and heightfield configuration.
//!
//! Configuration is supplied once at setup and is immutable afterwards.

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DIMENSION, DEFAULT_UV_SCALE};
use crate::error::ConfigError;

/// One layer of the summed noise that drives the water elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    /// Scroll speed of the noise in grid units per second (x, z).
    /// Alternate octaves only use its magnitude as an angular speed.
    pub speed: Vec2,
    /// Spatial frequency multiplier applied to grid coordinates (x, z)
    pub scale: Vec2,
    /// Amplitude of this layer
    pub height: f32,
    /// Use the cosine-of-noise waveform instead of scrolling noise
    #[serde(default)]
    pub alternate: bool,
}

impl Octave {
    pub fn new(speed: Vec2, scale: Vec2, height: f32) -> Self {
        Self {
            speed,
            scale,
            height,
            alternate: false,
        }
    }

    pub fn alternate(speed: Vec2, scale: Vec2, height: f32) -> Self {
        Self {
            speed,
            scale,
            height,
            alternate: true,
        }
    }
}

impl Default for Octave {
    fn default() -> Self {
        Self::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), 1.0)
    }
}

/// Complete heightfield configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightFieldConfig {
    /// Cells per side; the grid has (dimension + 1)² vertices
    pub dimension: u32,
    pub octaves: Vec<Octave>,
    /// Texture tiling scale, rendering only
    pub uv_scale: f32,
    /// Seed of the noise kernel
    pub seed: u32,
    /// World position of grid vertex (0, 0)
    pub origin: Vec3,
    /// World size of one grid cell (x, z) and the elevation multiplier (y)
    pub scale: Vec3,
}

impl Default for HeightFieldConfig {
    fn default() -> Self {
        WavePreset::default().to_config(DEFAULT_DIMENSION)
    }
}

impl HeightFieldConfig {
    pub fn new(dimension: u32, octaves: Vec<Octave>) -> Self {
        Self {
            dimension,
            octaves,
            uv_scale: DEFAULT_UV_SCALE,
            seed: 0,
            origin: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_uv_scale(mut self, uv_scale: f32) -> Self {
        self.uv_scale = uv_scale;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension == 0 {
            return Err(ConfigError::InvalidDimension(self.dimension));
        }
        if self.octaves.is_empty() {
            return Err(ConfigError::NoOctaves);
        }
        if !(self.uv_scale.is_finite() && self.uv_scale > 0.0) {
            return Err(ConfigError::InvalidUvScale(self.uv_scale));
        }
        if !self.scale.is_finite() || self.scale.x == 0.0 || self.scale.z == 0.0 {
            return Err(ConfigError::InvalidWorldScale(self.scale.to_array()));
        }
        Ok(())
    }
}

/// Preset octave stacks for different sea states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WavePreset {
    /// Flat water; a single zero-height octave
    Still,
    /// Slow, low rolling noise
    Calm,
    /// Standard mix of rolling noise and a standing alternate layer
    #[default]
    Swell,
    /// Short, fast chop layered on a moderate swell
    Choppy,
    /// Tall, fast waves
    Storm,
}

impl WavePreset {
    pub fn octaves(self) -> Vec<Octave> {
        match self {
            WavePreset::Still => vec![Octave::new(Vec2::ZERO, Vec2::ONE, 0.0)],
            WavePreset::Calm => vec![Octave::new(Vec2::new(0.5, 0.3), Vec2::new(2.0, 2.0), 0.4)],
            WavePreset::Swell => vec![
                Octave::new(Vec2::new(1.0, 1.0), Vec2::new(4.0, 4.0), 1.0),
                Octave::alternate(Vec2::new(1.0, 0.5), Vec2::new(2.0, 2.0), 0.3),
            ],
            WavePreset::Choppy => vec![
                Octave::new(Vec2::new(1.0, 0.5), Vec2::new(3.0, 3.0), 0.8),
                Octave::new(Vec2::new(-2.0, 1.5), Vec2::new(10.0, 10.0), 0.25),
                Octave::alternate(Vec2::new(2.0, 2.0), Vec2::new(6.0, 6.0), 0.15),
            ],
            WavePreset::Storm => vec![
                Octave::new(Vec2::new(2.5, 1.0), Vec2::new(3.0, 3.0), 2.5),
                Octave::new(Vec2::new(-1.5, 3.0), Vec2::new(7.0, 7.0), 0.8),
                Octave::alternate(Vec2::new(3.0, 1.0), Vec2::new(5.0, 5.0), 0.5),
            ],
        }
    }

    pub fn to_config(self, dimension: u32) -> HeightFieldConfig {
        HeightFieldConfig::new(dimension, self.octaves())
    }
}
