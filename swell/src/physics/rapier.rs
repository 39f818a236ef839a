//! Rapier physics integration for floaters.
//!
//! Floaters are dynamic bodies with Rapier gravity disabled: the buoyancy
//! step supplies gravity as a depth-scaled external force, sets the linear
//! damping and snaps or nudges the pose directly.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::buoyancy::FloaterConfig;
use crate::error::ConfigError;
use crate::plugin::{pose_of, Floater};
use crate::sets::SwellFixedUpdateSet;

/// Angular damping given to every floater body.
pub const FLOATER_ANGULAR_DAMPING: f32 = 0.5;

/// Bundle for spawning a floating rigid body.
#[derive(Bundle)]
pub struct FloaterPhysicsBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub velocity: Velocity,
    pub gravity_scale: GravityScale,
    pub damping: Damping,
    pub external_force: ExternalForce,
    pub floater: Floater,
    pub transform: Transform,
}

impl FloaterPhysicsBundle {
    /// Create a box-shaped floater.
    ///
    /// # Arguments
    /// * `config` - Float points and drag setup
    /// * `transform` - Initial pose; the floater's centre offset is taken here
    /// * `half_extents` - Half size of the box collider
    pub fn new(
        config: FloaterConfig,
        transform: Transform,
        half_extents: Vec3,
    ) -> Result<Self, ConfigError> {
        let floater = Floater::new(config, &transform)?;
        Ok(Self {
            body: RigidBody::Dynamic,
            collider: Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            velocity: Velocity::zero(),
            // Buoyancy supplies gravity itself
            gravity_scale: GravityScale(0.0),
            damping: Damping {
                linear_damping: floater.body.air_drag(),
                angular_damping: FLOATER_ANGULAR_DAMPING,
            },
            external_force: ExternalForce::default(),
            floater,
            transform,
        })
    }
}

/// Plugin that sets up Rapier and feeds it floater outputs.
pub struct FloaterPhysicsPlugin;

impl Plugin for FloaterPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            RapierPhysicsPlugin::<NoUserData>::default().with_default_system_setup(true),
        );
        app.add_systems(
            FixedUpdate,
            apply_buoyancy.in_set(SwellFixedUpdateSet::Apply),
        );
    }
}

/// Writes each floater's last output into its rigid body.
pub fn apply_buoyancy(
    mut floaters: Query<(
        &Floater,
        &mut Transform,
        Option<&mut Damping>,
        Option<&mut ExternalForce>,
    )>,
) {
    for (floater, mut transform, damping, external_force) in &mut floaters {
        let output = &floater.output;

        if let Some(mut damping) = damping {
            damping.linear_damping = output.drag;
        }
        if let Some(mut external_force) = external_force {
            external_force.force = output.force;
        }

        if output.position_override.is_some()
            || output.rotation_delta.is_some()
            || output.translation != Vec3::ZERO
        {
            let pose = output.correct_pose(pose_of(&transform));
            transform.translation = pose.position;
            transform.rotation = pose.rotation;
        }
    }
}
