//! Rigid-body integration for floaters.
//!
//! The water core never integrates motion; this module hands its outputs to
//! bevy_rapier3d.

pub mod rapier;

pub use rapier::*;
