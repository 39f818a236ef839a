//! Per-body buoyancy state and the per-tick update.
//!
//! A [`BuoyancyBody`] samples the water surface under its float points, works
//! out whether its centroid is above or below the resulting water line and
//! produces a [`BuoyancyOutput`] for the rigid-body integrator to apply. It
//! never integrates motion itself.

use bevy::math::{Quat, Vec3};
use bevy_log::{trace, warn};

use super::config::FloaterConfig;
use super::math::{centroid, from_to_rotation, smooth_damp, surface_normal};
use crate::constants::{AIRBORNE_FOLLOW_FACTOR, MAX_FORCE_DEPTH, ROTATION_SMOOTH_TIME};
use crate::error::ConfigError;
use crate::waves::SurfaceSampler;

/// World pose of the rigid body a floater is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl BodyPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Body-local point to world space.
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for BodyPose {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Submersion {
    #[default]
    Airborne,
    Submerged,
}

/// What the integrator should do with a body this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuoyancyOutput {
    pub submersion: Submersion,
    /// Linear drag coefficient to set on the body
    pub drag: f32,
    /// Force to apply at the centre of mass
    pub force: Vec3,
    /// New body position when submerged; only Y differs from the current pose
    pub position_override: Option<Vec3>,
    /// Kinematic nudge along world up while airborne
    pub translation: Vec3,
    /// Rotation to pre-multiply onto the body orientation
    pub rotation_delta: Option<Quat>,
}

impl Default for BuoyancyOutput {
    fn default() -> Self {
        Self {
            submersion: Submersion::Airborne,
            drag: 0.0,
            force: Vec3::ZERO,
            position_override: None,
            translation: Vec3::ZERO,
            rotation_delta: None,
        }
    }
}

impl BuoyancyOutput {
    /// Applies the kinematic corrections (snap, nudge, rotation) to `pose`.
    /// Force and drag are left to the integrator.
    pub fn correct_pose(&self, pose: BodyPose) -> BodyPose {
        let position = self.position_override.unwrap_or(pose.position) + self.translation;
        let rotation = match self.rotation_delta {
            Some(delta) => (delta * pose.rotation).normalize(),
            None => pose.rotation,
        };
        BodyPose::new(position, rotation)
    }
}

#[derive(Debug, Clone)]
pub struct BuoyancyBody {
    float_points: Vec<Vec3>,
    air_drag: f32,
    water_drag: f32,
    affect_direction: bool,
    center_offset: Vec3,
    water_line: f32,
    has_water_line: bool,
    water_line_points: Vec<Vec3>,
    target_up: Vec3,
    up_velocity: Vec3,
}

impl BuoyancyBody {
    /// Builds a floater and snapshots its centre offset at `pose`.
    pub fn new(config: FloaterConfig, pose: BodyPose) -> Result<Self, ConfigError> {
        config.validate()?;

        let footprint: Vec<Vec3> = config
            .float_points
            .iter()
            .map(|p| Vec3::new(p.x, 0.0, p.z))
            .collect();
        if surface_normal(&footprint).is_none() {
            warn!(
                "Floater has {} float point(s) without a usable footprint; its surface normal will default to +Y",
                config.float_points.len()
            );
        }

        let count = config.float_points.len();
        let mut body = Self {
            float_points: config.float_points,
            air_drag: config.air_drag,
            water_drag: config.water_drag,
            affect_direction: config.affect_direction,
            center_offset: Vec3::ZERO,
            water_line: 0.0,
            has_water_line: false,
            water_line_points: vec![Vec3::ZERO; count],
            target_up: Vec3::Y,
            up_velocity: Vec3::ZERO,
        };
        body.compute_center(pose);
        Ok(body)
    }

    /// Stores the offset from `pose` to the centroid of the float points.
    ///
    /// The offset is kept in world axes and is not recomputed as the body moves.
    pub fn compute_center(&mut self, pose: BodyPose) {
        for (slot, local) in self.water_line_points.iter_mut().zip(&self.float_points) {
            *slot = pose.transform_point(*local);
        }
        self.center_offset = centroid(&self.water_line_points) - pose.position;
        log::debug!("Floater centre offset: {}", self.center_offset);
    }

    /// World-space centroid for `pose`.
    pub fn center(&self, pose: BodyPose) -> Vec3 {
        pose.position + self.center_offset
    }

    pub fn center_offset(&self) -> Vec3 {
        self.center_offset
    }

    pub fn float_points(&self) -> &[Vec3] {
        &self.float_points
    }

    /// Mean sampled water height from the last step.
    pub fn water_line(&self) -> f32 {
        self.water_line
    }

    /// Surface points under each float point from the last step.
    pub fn water_line_points(&self) -> &[Vec3] {
        &self.water_line_points
    }

    /// Surface normal under the body from the last step.
    pub fn target_up(&self) -> Vec3 {
        self.target_up
    }

    pub fn air_drag(&self) -> f32 {
        self.air_drag
    }

    pub fn water_drag(&self) -> f32 {
        self.water_drag
    }

    pub fn affect_direction(&self) -> bool {
        self.affect_direction
    }

    /// Advances the floater by one tick.
    ///
    /// `water` must already be regenerated for this tick. `gravity` is the world
    /// gravity vector; the integrator is expected to disable its own gravity
    /// for this body and apply `force` instead.
    pub fn step(
        &mut self,
        water: &impl SurfaceSampler,
        pose: BodyPose,
        gravity: Vec3,
        dt: f32,
    ) -> BuoyancyOutput {
        let count = self.float_points.len() as f32;
        let mut new_water_line = 0.0;
        let mut point_under_water = false;

        for (slot, local) in self.water_line_points.iter_mut().zip(&self.float_points) {
            let point = pose.transform_point(*local);
            let height = water.sample_height(point);
            *slot = Vec3::new(point.x, height, point.z);
            new_water_line += height / count;

            if height > point.y {
                point_under_water = true;
            }
        }

        // The first tick has nothing to follow.
        let water_line_delta = if self.has_water_line {
            new_water_line - self.water_line
        } else {
            0.0
        };
        self.water_line = new_water_line;
        self.has_water_line = true;

        self.target_up = surface_normal(&self.water_line_points).unwrap_or(Vec3::Y);

        let center = self.center(pose);
        let mut output = BuoyancyOutput::default();
        let mut applied_gravity = gravity;

        if self.water_line > center.y {
            output.submersion = Submersion::Submerged;
            output.drag = self.water_drag;
            output.position_override = Some(Vec3::new(
                pose.position.x,
                self.water_line - self.center_offset.y,
                pose.position.z,
            ));
        } else {
            output.submersion = Submersion::Airborne;
            output.drag = self.air_drag;
            if self.affect_direction {
                applied_gravity = -self.target_up * gravity.length();
            }
            output.translation = Vec3::Y * (water_line_delta * AIRBORNE_FOLLOW_FACTOR);
        }

        let depth = (self.water_line - center.y).abs().clamp(0.0, MAX_FORCE_DEPTH);
        output.force = applied_gravity * depth;

        if point_under_water {
            let up = pose.up();
            let damped = smooth_damp(
                up,
                self.target_up,
                &mut self.up_velocity,
                ROTATION_SMOOTH_TIME,
                dt,
            );
            output.rotation_delta = Some(from_to_rotation(up, damped));
        }

        trace!(
            "Floater step: water line {:.3}, centre {:.3}, {:?}",
            self.water_line,
            center.y,
            output.submersion
        );

        output
    }
}
