use bevy::math::Vec3;
use bevy_log::info;
use ron::de::from_str;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use swell::{FloaterConfig, HeightFieldConfig, WavePreset, GRAVITY};

/// A floating body to spawn at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySpawn {
    pub name: String,
    pub position: Vec3,
    pub half_extents: Vec3,
    pub floater: FloaterConfig,
}

impl Default for BodySpawn {
    fn default() -> Self {
        Self {
            name: "crate".into(),
            position: Vec3::ZERO,
            half_extents: Vec3::splat(0.5),
            floater: FloaterConfig::square(1.0),
        }
    }
}

/// Everything the runner needs: the water surface, world gravity and the bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub water: HeightFieldConfig,
    pub gravity: Vec3,
    pub bodies: Vec<BodySpawn>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            water: WavePreset::Swell
                .to_config(16)
                .with_scale(Vec3::new(2.0, 1.0, 2.0)),
            gravity: GRAVITY,
            bodies: vec![
                BodySpawn {
                    name: "crate".into(),
                    position: Vec3::new(8.0, 2.0, 8.0),
                    ..Default::default()
                },
                BodySpawn {
                    name: "dinghy".into(),
                    position: Vec3::new(16.0, 1.0, 12.0),
                    half_extents: Vec3::new(1.0, 0.3, 2.0),
                    floater: FloaterConfig::hull(2.0, 4.0, 0.3).with_drag(0.5, 6.0),
                },
                BodySpawn {
                    name: "buoy".into(),
                    position: Vec3::new(24.0, 0.5, 20.0),
                    half_extents: Vec3::new(0.4, 0.8, 0.4),
                    floater: FloaterConfig::square(0.8).with_affect_direction(true),
                },
            ],
        }
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario, Box<dyn std::error::Error>> {
    let contents: String = fs::read_to_string(path)?;
    let scenario: Scenario = from_str(&contents)?;

    info!(
        "Loaded scenario from {} with {} body(ies)",
        path.display(),
        scenario.bodies.len()
    );

    Ok(scenario)
}
