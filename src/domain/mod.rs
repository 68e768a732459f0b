//! Domain model: entity identity, errors, configuration.

pub mod config;
pub mod entity;
pub mod error;

pub use config::WorldConfig;
pub use entity::{Body, EntityId, EntitySet};
pub use error::EngineError;
