use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AIR_DRAG, DEFAULT_WATER_DRAG};
use crate::error::ConfigError;

/// Static floater setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloaterConfig {
    /// Sample anchors in body-local space, rigidly attached to the body.
    /// At least three non-collinear points are needed for a meaningful surface normal.
    pub float_points: Vec<Vec3>,
    pub air_drag: f32,
    pub water_drag: f32,
    /// Pull airborne bodies along the local surface normal instead of world down
    pub affect_direction: bool,
}

impl Default for FloaterConfig {
    fn default() -> Self {
        Self::square(1.0)
    }
}

impl FloaterConfig {
    pub fn new(float_points: Vec<Vec3>) -> Self {
        Self {
            float_points,
            air_drag: DEFAULT_AIR_DRAG,
            water_drag: DEFAULT_WATER_DRAG,
            affect_direction: false,
        }
    }

    /// Four float points on the corners of a square of side `size`, centred on the body.
    pub fn square(size: f32) -> Self {
        let h = size * 0.5;
        Self::new(vec![
            Vec3::new(-h, 0.0, -h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(h, 0.0, h),
            Vec3::new(-h, 0.0, h),
        ])
    }

    /// Float points at the four corners of a `width` × `length` hull footprint,
    /// offset `keel` below the body origin.
    pub fn hull(width: f32, length: f32, keel: f32) -> Self {
        let (w, l) = (width * 0.5, length * 0.5);
        Self::new(vec![
            Vec3::new(-w, -keel, -l),
            Vec3::new(w, -keel, -l),
            Vec3::new(w, -keel, l),
            Vec3::new(-w, -keel, l),
        ])
    }

    pub fn with_drag(mut self, air_drag: f32, water_drag: f32) -> Self {
        self.air_drag = air_drag;
        self.water_drag = water_drag;
        self
    }

    pub fn with_affect_direction(mut self, affect_direction: bool) -> Self {
        self.affect_direction = affect_direction;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.float_points.is_empty() {
            return Err(ConfigError::NoFloatPoints);
        }
        for (name, value) in [("air_drag", self.air_drag), ("water_drag", self.water_drag)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeDrag { name, value });
            }
        }
        Ok(())
    }
}
