//! Error types for the engine.

use thiserror::Error;

use crate::core::math::MathError;
use crate::domain::entity::EntityId;

/// Errors surfaced by construction, configuration and world commands.
///
/// Per-tick force application never returns these; degenerate inputs there
/// are skipped so one bad body cannot abort the frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A constructor or setter received an unusable value.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// World configuration failed to parse or validate.
    #[error("invalid world config: {0}")]
    InvalidConfig(String),

    /// No body with this id is owned by the world.
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// Degenerate linear algebra.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Rejects negative or non-finite masses (and inertias).
pub(crate) fn validate_mass(name: &'static str, mass: f64) -> Result<(), EngineError> {
    if !mass.is_finite() {
        return Err(EngineError::invalid(name, format!("must be finite, got {mass}")));
    }
    if mass < 0.0 {
        return Err(EngineError::invalid(name, format!("must be >= 0, got {mass}")));
    }
    Ok(())
}
