use bevy_ecs::schedule::SystemSet;

/// Stages of one water tick, run in this order inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwellFixedUpdateSet {
    /// Heightfield regeneration; the only writer of the water surface
    Regenerate,
    /// Floaters read the regenerated surface and compute their outputs
    Buoyancy,
    /// Outputs are handed to the rigid-body integrator
    Apply,
}
