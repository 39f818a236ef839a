//! Buoyancy for rigid bodies floating on a [`crate::waves::HeightField`].

pub mod body;
pub mod config;
pub mod math;

pub use body::{BodyPose, BuoyancyBody, BuoyancyOutput, Submersion};
pub use config::FloaterConfig;
