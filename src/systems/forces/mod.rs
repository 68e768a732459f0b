//! Force generators - everything that pushes bodies around each tick
//!
//! A generator only writes into force/torque accumulators. Position and
//! velocity belong to the integrator.
//!
//! Generators are shared through `Rc`: one gravity instance can be registered
//! against every particle in the world. The few that carry tunable state
//! (wind, anchors, control surfaces) keep it in a `Cell`.

mod aero;
mod basic;
mod buoyancy;
mod factory;
mod registry;
mod springs;
mod torque;

pub use aero::{Aero, AeroControl};
pub use basic::{Drag, Gravity, Wind};
pub use buoyancy::Buoyancy;
pub use factory::ForceGeneratorFactory;
pub use registry::ForceRegistry;
pub use springs::{AnchoredBungee, AnchoredSpring, Bungee, Spring};
pub use torque::{BodySpring, ConstantTorque};

use crate::core::math::Vector2;
use crate::domain::entity::{Body, EntityId, EntitySet};

/// Context passed to generators (one per registry entry per tick)
pub struct ForceContext<'a, T> {
    /// Body the entry was registered against
    pub target: EntityId,
    /// Every body in the world, so two-body generators can read the other end
    pub bodies: &'a mut EntitySet<T>,
    /// Elapsed time for this tick in milliseconds
    pub delta_ms: f64,
}

impl<'a, T: Body> ForceContext<'a, T> {
    #[inline]
    pub fn target(&self) -> Option<&T> {
        self.bodies.get(self.target)
    }

    #[inline]
    pub fn target_mut(&mut self) -> Option<&mut T> {
        self.bodies.get_mut(self.target)
    }

    #[inline]
    pub fn body(&self, id: EntityId) -> Option<&T> {
        self.bodies.get(id)
    }
}

/// Force generator trait - each kind of force implements this
pub trait ForceGenerator<T> {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>);

    /// Short label for logs and debugging.
    fn name(&self) -> &'static str;

    /// True when the generator reads body `id` besides its target. Such
    /// entries are dropped once `id` leaves the world.
    fn references(&self, _id: EntityId) -> bool {
        false
    }
}

/// `-k (|d| - rest) * d/|d|`; `None` when the ends coincide.
pub(crate) fn spring_force(delta: Vector2, spring_constant: f64, rest_length: f64) -> Option<Vector2> {
    let length = delta.magnitude();
    let direction = delta.try_normalize()?;
    Some(direction * (-spring_constant * (length - rest_length)))
}

/// Like [`spring_force`] but slack (no force) at or below rest length.
pub(crate) fn bungee_force(delta: Vector2, spring_constant: f64, rest_length: f64) -> Option<Vector2> {
    if delta.magnitude() <= rest_length {
        return None;
    }
    spring_force(delta, spring_constant, rest_length)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::math::Vector2;
    use crate::domain::entity::{EntityId, EntitySet};
    use crate::systems::particle::Particle;

    /// World of undamped particles at the given positions.
    pub fn particles(positions: &[Vector2]) -> (EntitySet<Particle>, Vec<EntityId>) {
        let mut set = EntitySet::new();
        let ids = positions
            .iter()
            .map(|&p| set.insert(Particle::new(p).with_damping(1.0)).unwrap())
            .collect();
        (set, ids)
    }
}
