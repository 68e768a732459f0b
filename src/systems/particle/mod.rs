//! Particle - point mass with position, velocity, damping and a force
//! accumulator, advanced by a semi-implicit Euler integrator.

mod particle;

pub use particle::{Particle, DEFAULT_DAMPING};
pub(crate) use particle::clamp_damping;
