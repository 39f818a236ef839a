//! Procedural wave heightfield and buoyancy for floating rigid bodies.
//!
//! Each fixed tick the [`waves::HeightField`] is regenerated from its noise
//! octaves, then every [`buoyancy::BuoyancyBody`] samples it under its float
//! points and produces drag, force and pose corrections for the rigid-body
//! integrator. [`plugin::SwellPlugin`] runs that pipeline inside Bevy and
//! [`physics::FloaterPhysicsPlugin`] applies the results through Rapier.

pub mod buoyancy;
pub mod constants;
pub mod error;
pub mod physics;
pub mod plugin;
pub mod sets;
pub mod waves;

pub use buoyancy::{BodyPose, BuoyancyBody, BuoyancyOutput, FloaterConfig, Submersion};
pub use constants::*;
pub use error::ConfigError;
pub use plugin::{Floater, SwellPlugin, SwellSettings, WaterSurface};
pub use sets::SwellFixedUpdateSet;
pub use waves::{HeightField, HeightFieldConfig, Octave, SurfaceSampler, WavePreset};
