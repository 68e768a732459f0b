use crate::core::math::Vector2;
use crate::domain::entity::{next_entity_id, Body, EntityId};
use crate::domain::error::{validate_mass, EngineError};
use crate::systems::boundary::BoundaryAction;

/// Default per-second velocity retention.
pub const DEFAULT_DAMPING: f64 = 0.99;

pub(crate) fn clamp_damping(damping: f64) -> f64 {
    if damping.is_nan() {
        DEFAULT_DAMPING
    } else {
        damping.clamp(0.0, 1.0)
    }
}

/// Point mass - the building block of mass-aggregate bodies
#[derive(Debug)]
pub struct Particle {
    id: EntityId,

    // === Physics State ===
    /// World position
    pub pos: Vector2,
    /// Velocity (units per second)
    pub vel: Vector2,
    /// Fraction of velocity kept after one second, in [0, 1]
    damping: f64,
    /// 0 = infinite mass (immovable)
    inverse_mass: f64,
    /// Sum of forces for the current tick
    force_accum: Vector2,

    // === Shape ===
    /// Bounding radius used by boundary actions and contact triggers
    pub radius: f64,
    /// Overrides the world's boundary action when set
    pub boundary: Option<BoundaryAction>,
}

impl Particle {
    /// Unit-mass particle at rest.
    pub fn new(pos: Vector2) -> Self {
        Self {
            id: next_entity_id(),
            pos,
            vel: Vector2::ZERO,
            damping: DEFAULT_DAMPING,
            inverse_mass: 1.0,
            force_accum: Vector2::ZERO,
            radius: 0.0,
            boundary: None,
        }
    }

    /// Immovable particle (anchors, pins).
    pub fn fixed(pos: Vector2) -> Self {
        let mut p = Self::new(pos);
        p.inverse_mass = 0.0;
        p
    }

    pub fn with_velocity(mut self, vel: Vector2) -> Self {
        self.vel = vel;
        self
    }

    /// Damping is clamped into [0, 1].
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.set_damping(damping);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    pub fn with_boundary(mut self, action: BoundaryAction) -> Self {
        self.boundary = Some(action);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Result<Self, EngineError> {
        self.set_mass(mass)?;
        Ok(self)
    }

    #[cfg(test)]
    pub(crate) fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    /// Copy of this particle's state under a freshly allocated id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: next_entity_id(),
            pos: self.pos,
            vel: self.vel,
            damping: self.damping,
            inverse_mass: self.inverse_mass,
            force_accum: self.force_accum,
            radius: self.radius,
            boundary: self.boundary,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Clamped into [0, 1]; NaN falls back to the default.
    pub fn set_damping(&mut self, damping: f64) {
        self.damping = clamp_damping(damping);
    }

    /// `mass == 0` stores infinite mass.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), EngineError> {
        validate_mass("mass", mass)?;
        self.inverse_mass = if mass == 0.0 { 0.0 } else { 1.0 / mass };
        Ok(())
    }

    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    #[inline]
    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass != 0.0
    }

    #[inline]
    pub fn force_accum(&self) -> Vector2 {
        self.force_accum
    }

    #[inline]
    pub fn apply_force(&mut self, force: Vector2) {
        self.force_accum.add_mut(force);
    }

    #[inline]
    pub fn clear_force_accum(&mut self) {
        self.force_accum.clear();
    }

    /// Semi-implicit Euler step over `delta_ms` milliseconds.
    ///
    /// Damping is raised to the elapsed seconds so the effective friction
    /// does not depend on frame rate. Immovable particles never move.
    pub fn integrate(&mut self, delta_ms: f64) {
        if self.inverse_mass == 0.0 {
            return;
        }
        let dt = delta_ms / 1000.0;
        if dt <= 0.0 {
            return;
        }

        self.vel.mult_scalar_mut(self.damping.powf(dt));
        self.vel.add_scaled_mut(self.force_accum, self.inverse_mass * dt);
        self.pos.add_scaled_mut(self.vel, dt);

        debug_finite!(self.vel, "particle velocity");
        debug_finite!(self.pos, "particle position");
    }

    /// Non-strict distance test.
    #[inline]
    pub fn is_close_to_point(&self, point: Vector2, radius: f64) -> bool {
        self.pos.distance(point) <= radius
    }
}

impl Body for Particle {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vector2 {
        self.pos
    }

    fn set_position(&mut self, pos: Vector2) {
        self.pos = pos;
    }

    fn velocity(&self) -> Vector2 {
        self.vel
    }

    fn set_velocity(&mut self, vel: Vector2) {
        self.vel = vel;
    }

    fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    fn apply_force(&mut self, force: Vector2) {
        Particle::apply_force(self, force);
    }

    fn integrate(&mut self, delta_ms: f64) {
        Particle::integrate(self, delta_ms);
    }

    fn clear_accumulators(&mut self) {
        self.clear_force_accum();
    }

    fn half_extents(&self) -> Vector2 {
        Vector2::new(self.radius, self.radius)
    }

    fn boundary_override(&self) -> Option<BoundaryAction> {
        self.boundary
    }

    fn is_close_to_point(&self, point: Vector2, radius: f64) -> bool {
        Particle::is_close_to_point(self, point, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = Particle::new(Vector2::ZERO);
        let b = Particle::new(Vector2::ZERO);
        assert!(b.id() > a.id());
    }

    #[test]
    fn zero_mass_means_immovable() {
        let mut p = Particle::new(Vector2::ZERO);
        p.set_mass(0.0).unwrap();
        assert!(!p.has_finite_mass());
        assert_eq!(Body::mass(&p), f64::INFINITY);

        p.set_mass(4.0).unwrap();
        assert_eq!(p.inverse_mass(), 0.25);
        assert!(p.has_finite_mass());
    }

    #[test]
    fn negative_mass_is_rejected() {
        let mut p = Particle::new(Vector2::ZERO);
        assert!(p.set_mass(-1.0).is_err());
        assert!(p.set_mass(f64::NAN).is_err());
        assert_eq!(p.inverse_mass(), 1.0);
    }

    #[test]
    fn immovable_particle_ignores_forces() {
        for delta_ms in [1.0, 16.0, 1000.0, 1e6] {
            let mut p = Particle::fixed(Vector2::new(3.0, 4.0)).with_velocity(Vector2::new(1.0, 1.0));
            p.apply_force(Vector2::new(1e9, -1e9));
            p.integrate(delta_ms);
            assert_eq!(p.pos, Vector2::new(3.0, 4.0));
            assert_eq!(p.vel, Vector2::new(1.0, 1.0));
        }
    }

    #[test]
    fn integrate_is_semi_implicit() {
        let mut p = Particle::new(Vector2::ZERO).with_damping(1.0);
        p.apply_force(Vector2::new(0.0, -9.81));
        p.integrate(1000.0);
        assert_relative_eq!(p.vel.y, -9.81);
        assert_relative_eq!(p.pos.y, -9.81);
    }

    #[test]
    fn damping_is_frame_rate_independent() {
        let mut one = Particle::new(Vector2::ZERO)
            .with_velocity(Vector2::new(10.0, 0.0))
            .with_damping(0.5);
        let mut many = one.duplicate();

        one.integrate(1000.0);
        for _ in 0..100 {
            many.integrate(10.0);
        }
        assert_relative_eq!(one.vel.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(many.vel.x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn damping_setter_keeps_velocity_finite() {
        let mut p = Particle::new(Vector2::ZERO).with_velocity(Vector2::new(10.0, 0.0));
        p.set_damping(-0.5);
        assert_eq!(p.damping(), 0.0);
        p.set_damping(3.0);
        assert_eq!(p.damping(), 1.0);
        p.set_damping(f64::NAN);
        assert_eq!(p.damping(), DEFAULT_DAMPING);

        p.set_damping(-2.0);
        p.integrate(500.0);
        assert!(p.vel.x.is_finite());
    }

    #[test]
    fn duplicate_copies_state_under_new_id() {
        let p = Particle::new(Vector2::new(1.0, 2.0))
            .with_velocity(Vector2::X)
            .with_radius(3.0);
        let twin = p.duplicate();
        assert_ne!(twin.id(), p.id());
        assert_eq!(twin.pos, p.pos);
        assert_eq!(twin.vel, p.vel);
        assert_eq!(twin.radius, 3.0);
    }

    #[test]
    fn force_accumulates_until_cleared() {
        let mut p = Particle::new(Vector2::ZERO);
        p.apply_force(Vector2::new(1.0, 2.0));
        p.apply_force(Vector2::new(3.0, -1.0));
        assert_eq!(p.force_accum(), Vector2::new(4.0, 1.0));
        p.clear_force_accum();
        assert_eq!(p.force_accum(), Vector2::ZERO);
    }

    #[test]
    fn close_to_point_is_inclusive() {
        let p = Particle::new(Vector2::new(3.0, 4.0));
        assert!(p.is_close_to_point(Vector2::ZERO, 5.0));
        assert!(!p.is_close_to_point(Vector2::ZERO, 4.999));
    }
}
