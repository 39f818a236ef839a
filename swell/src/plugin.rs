//! Bevy plugin running the water tick.
//!
//! This plugin:
//! - Owns the heightfield as the [`WaterSurface`] resource
//! - Regenerates it once per fixed tick
//! - Steps every [`Floater`] against the freshly regenerated surface
//!
//! Applying the outputs to rigid bodies is left to [`crate::physics`].

use bevy::prelude::*;
use bevy_log::info;

use crate::buoyancy::{BodyPose, BuoyancyBody, BuoyancyOutput, FloaterConfig};
use crate::constants::GRAVITY;
use crate::error::ConfigError;
use crate::sets::SwellFixedUpdateSet;
use crate::waves::{HeightField, HeightFieldConfig};

/// The shared water surface. Written only during [`SwellFixedUpdateSet::Regenerate`].
#[derive(Resource, Debug, Clone)]
pub struct WaterSurface {
    field: HeightField,
}

impl WaterSurface {
    pub fn new(field: HeightField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }
}

/// Runtime switches for the water tick.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SwellSettings {
    pub enabled: bool,
    /// World gravity fed to floaters; their rigid bodies should not get gravity elsewhere.
    pub gravity: Vec3,
}

impl Default for SwellSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            gravity: GRAVITY,
        }
    }
}

/// Buoyancy state attached to a rigid-body entity.
#[derive(Component, Debug, Clone)]
pub struct Floater {
    pub body: BuoyancyBody,
    /// Output of the most recent tick
    pub output: BuoyancyOutput,
}

impl Floater {
    /// Builds the floater with its centre offset taken at `transform`.
    pub fn new(config: FloaterConfig, transform: &Transform) -> Result<Self, ConfigError> {
        Ok(Self {
            body: BuoyancyBody::new(config, pose_of(transform))?,
            output: BuoyancyOutput::default(),
        })
    }
}

pub fn pose_of(transform: &Transform) -> BodyPose {
    BodyPose::new(transform.translation, transform.rotation)
}

pub struct SwellPlugin {
    field: HeightField,
}

impl SwellPlugin {
    pub fn new(config: HeightFieldConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            field: HeightField::new(config)?,
        })
    }
}

impl Plugin for SwellPlugin {
    fn build(&self, app: &mut App) {
        info!(
            "Water surface: {0}x{0} cells, {1} octave(s)",
            self.field.dimension(),
            self.field.octaves().len()
        );

        app.insert_resource(WaterSurface::new(self.field.clone()))
            .init_resource::<SwellSettings>()
            .configure_sets(
                FixedUpdate,
                (
                    SwellFixedUpdateSet::Regenerate,
                    SwellFixedUpdateSet::Buoyancy,
                    SwellFixedUpdateSet::Apply,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    regenerate_water_surface.in_set(SwellFixedUpdateSet::Regenerate),
                    step_floaters.in_set(SwellFixedUpdateSet::Buoyancy),
                ),
            );
    }
}

fn regenerate_water_surface(
    mut surface: ResMut<WaterSurface>,
    settings: Res<SwellSettings>,
    time: Res<Time>,
) {
    if !settings.enabled {
        return;
    }

    surface.field.regenerate(time.elapsed_secs());
}

fn step_floaters(
    surface: Res<WaterSurface>,
    settings: Res<SwellSettings>,
    time: Res<Time>,
    mut floaters: Query<(&mut Floater, &Transform)>,
) {
    if !settings.enabled {
        return;
    }

    let dt = time.delta_secs();
    for (mut floater, transform) in &mut floaters {
        let floater = &mut *floater;
        floater.output = floater
            .body
            .step(surface.field(), pose_of(transform), settings.gravity, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buoyancy::Submersion;
    use crate::waves::WavePreset;
    use std::time::Duration;

    fn app_at(config: HeightFieldConfig, elapsed: f32) -> App {
        let mut app = App::new();
        app.add_plugins(SwellPlugin::new(config).unwrap());
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_secs_f32(elapsed));
        app.insert_resource(time);
        app
    }

    fn spawn_floater(app: &mut App, transform: Transform) -> Entity {
        let floater = Floater::new(FloaterConfig::square(1.0), &transform).unwrap();
        app.world_mut().spawn((floater, transform)).id()
    }

    #[test]
    fn test_plugin_rejects_bad_config() {
        assert!(SwellPlugin::new(HeightFieldConfig::new(0, Vec::new())).is_err());
    }

    #[test]
    fn test_fixed_tick_regenerates_then_steps() {
        let mut app = app_at(WavePreset::Storm.to_config(8), 1.5);
        let entity = spawn_floater(&mut app, Transform::from_xyz(3.0, 20.0, 4.0));

        app.world_mut().run_schedule(FixedUpdate);

        let surface = app.world().resource::<WaterSurface>();
        assert_eq!(surface.field().time(), 1.5);

        let mut reference = HeightField::new(WavePreset::Storm.to_config(8)).unwrap();
        reference.regenerate(1.5);
        let expected: f32 = [
            Vec3::new(2.5, 20.0, 3.5),
            Vec3::new(3.5, 20.0, 3.5),
            Vec3::new(3.5, 20.0, 4.5),
            Vec3::new(2.5, 20.0, 4.5),
        ]
        .iter()
        .map(|p| reference.sample_height(*p) / 4.0)
        .sum();

        let floater = app.world().get::<Floater>(entity).unwrap();
        assert!((floater.body.water_line() - expected).abs() < 1e-5);
        assert_eq!(floater.output.submersion, Submersion::Airborne);
    }

    #[test]
    fn test_sunk_floater_is_submerged() {
        let mut app = app_at(WavePreset::Still.to_config(8), 0.0);
        let entity = spawn_floater(&mut app, Transform::from_xyz(4.0, -0.5, 4.0));

        app.world_mut().run_schedule(FixedUpdate);

        let floater = app.world().get::<Floater>(entity).unwrap();
        assert_eq!(floater.output.submersion, Submersion::Submerged);
        assert_eq!(floater.output.drag, floater.body.water_drag());
        assert!((floater.output.force - GRAVITY * 0.5).length() < 1e-5);
    }

    #[test]
    fn test_disabled_settings_skip_tick() {
        let mut app = app_at(WavePreset::Storm.to_config(8), 2.0);
        app.insert_resource(SwellSettings {
            enabled: false,
            ..Default::default()
        });
        let entity = spawn_floater(&mut app, Transform::from_xyz(1.0, 0.0, 1.0));

        app.world_mut().run_schedule(FixedUpdate);

        assert_eq!(app.world().resource::<WaterSurface>().field().time(), 0.0);
        let floater = app.world().get::<Floater>(entity).unwrap();
        assert_eq!(floater.output, BuoyancyOutput::default());
    }
}
