use bevy::prelude::*;
use bevy_app::ScheduleRunnerPlugin;
use std::time::Duration;
use swell::physics::{FloaterPhysicsBundle, FloaterPhysicsPlugin};
use swell::{Floater, Submersion, SwellFixedUpdateSet, SwellPlugin, SwellSettings, TICKS_PER_SECOND};

use crate::scenario::Scenario;

/// How long the runner keeps going and how often it reports.
#[derive(Resource, Debug, Clone)]
pub struct SimRun {
    pub tick: u64,
    pub max_ticks: u64,
    pub log_every: u64,
}

pub fn init(scenario: Scenario, max_ticks: u64, log_every: u64) {
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TICKS_PER_SECOND as f64,
        ))),
    );
    app.add_plugins(bevy::log::LogPlugin::default());
    app.add_plugins(TransformPlugin);
    app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND as f64));

    let swell = match SwellPlugin::new(scenario.water.clone()) {
        Ok(plugin) => plugin,
        Err(err) => {
            error!("Invalid water configuration: {}", err);
            std::process::exit(1);
        }
    };
    app.add_plugins(swell);
    app.add_plugins(FloaterPhysicsPlugin);
    app.insert_resource(SwellSettings {
        enabled: true,
        gravity: scenario.gravity,
    });

    for spawn in scenario.bodies {
        let transform = Transform::from_translation(spawn.position);
        match FloaterPhysicsBundle::new(spawn.floater, transform, spawn.half_extents) {
            Ok(bundle) => {
                info!("Spawning {} at {}", spawn.name, spawn.position);
                app.world_mut().spawn((bundle, Name::new(spawn.name)));
            }
            Err(err) => {
                error!("Invalid floater {}: {}", spawn.name, err);
                std::process::exit(1);
            }
        }
    }

    app.insert_resource(SimRun {
        tick: 0,
        max_ticks,
        log_every: log_every.max(1),
    });
    app.add_systems(
        FixedUpdate,
        report_floaters.after(SwellFixedUpdateSet::Apply),
    );

    app.run();
}

fn report_floaters(
    mut run: ResMut<SimRun>,
    floaters: Query<(&Name, &Floater, &Transform)>,
    mut exit: EventWriter<AppExit>,
) {
    run.tick += 1;

    if run.tick % run.log_every == 0 {
        for (name, floater, transform) in &floaters {
            let state = match floater.output.submersion {
                Submersion::Submerged => "submerged",
                Submersion::Airborne => "airborne",
            };
            info!(
                "[tick {}] {}: y = {:.3}, water line = {:.3}, {}, tilt = {:.1}°",
                run.tick,
                name,
                transform.translation.y,
                floater.body.water_line(),
                state,
                transform.up().angle_between(Vec3::Y).to_degrees()
            );
        }
    }

    if run.tick >= run.max_ticks {
        info!("Finished {} ticks", run.tick);
        exit.write(AppExit::Success);
    }
}
