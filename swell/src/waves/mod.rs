//! Procedural water surface.
//!
//! ```text
//!   HeightFieldConfig ──► HeightField ──regenerate(t)──► vertices
//!                              │                            │
//!                       sample_height(p)              SurfaceMesh
//!                              │                     (render buffers)
//!                              ▼
//!                       buoyancy::BuoyancyBody
//! ```
//!
//! The field is written only by [`HeightField::regenerate`]; everything else
//! reads it through [`SurfaceSampler`] once regeneration for the tick is done.

pub mod config;
pub mod heightfield;
pub mod mesh;
pub mod noise;

pub use config::{HeightFieldConfig, Octave, WavePreset};
pub use heightfield::{HeightField, SurfaceSampler};
pub use mesh::SurfaceMesh;
pub use noise::WaveNoise;
