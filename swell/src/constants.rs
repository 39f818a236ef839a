use bevy::prelude::*;

/// Default grid resolution (cells per side) of the wave heightfield.
pub const DEFAULT_DIMENSION: u32 = 10;
/// Default UV tiling scale.
pub const DEFAULT_UV_SCALE: f32 = 1.0;
/// Default drag applied to a floater whose centroid is above the water line.
pub const DEFAULT_AIR_DRAG: f32 = 1.0;
/// Default drag applied to a floater whose centroid is below the water line.
pub const DEFAULT_WATER_DRAG: f32 = 10.0;
/// Time constant (seconds) of the smooth-damp used to tilt floaters onto the surface normal.
pub const ROTATION_SMOOTH_TIME: f32 = 0.2;
/// Fraction of the tick-to-tick water line change applied to airborne floaters.
pub const AIRBORNE_FOLLOW_FACTOR: f32 = 0.9;
/// Submersion depth at which the buoyancy force saturates.
pub const MAX_FORCE_DEPTH: f32 = 1.0;
/// Added to the fourth corner distance when weighting heightfield samples.
pub const SAMPLE_EPSILON: f32 = 1e-6;
/// Smallest smooth time accepted by the smooth-damp.
pub const MIN_SMOOTH_TIME: f32 = 1e-4;
/// Default world gravity.
pub const GRAVITY: Vec3 = Vec3 {
    x: 0.0,
    y: -9.81,
    z: 0.0,
};
/// Fixed simulation rate used by the headless runner.
pub const TICKS_PER_SECOND: u64 = 50;
