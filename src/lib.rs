//! Kinetica Engine - 2D particle and rigid-body physics in WASM
//!
//! Architecture:
//! - core/       - math, guard macros, logging, trail buffers
//! - domain/     - entity identity, errors, world config
//! - systems/    - particles, rigid bodies, forces, boundaries, contacts
//! - simulation/ - world orchestration and the JS facade
//!
//! Host drivers own the clock: call `update(delta_ms)` once per animation
//! tick and read positions/orientations back to draw.

// Safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::utils::log::log(&format!("Kinetica engine {} initialized", version()));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::math::{Matrix2, Vector2};
pub use crate::domain::{Body, EngineError, EntityId, WorldConfig};
pub use crate::simulation::{ParticleWorld, ParticleWorldCore, RigidBodyWorld, RigidWorldCore, WorldCore};

/// Everything a Rust host usually needs.
pub mod prelude {
    pub use crate::core::math::{wrap_angle, Matrix2, Vector2};
    pub use crate::domain::{Body, EngineError, EntityId, WorldConfig};
    pub use crate::simulation::{ParticleWorldCore, RigidWorldCore, WorldCore};
    pub use crate::systems::boundary::{BoundaryAction, Bounds};
    pub use crate::systems::contact::{ContactEvent, ContactTrigger};
    pub use crate::systems::forces::{ForceGenerator, ForceGeneratorFactory, ForceRegistry};
    pub use crate::systems::particle::Particle;
    pub use crate::systems::rigid_body::RigidBody;
}
