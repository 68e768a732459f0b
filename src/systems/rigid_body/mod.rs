//! RigidBody - A solid body that moves and rotates as a unit
//!
//! The body keeps its orientation as an angle plus a cached rotation matrix
//! and transforms body-local points to world coordinates through it.

mod body;

pub use body::RigidBody;
