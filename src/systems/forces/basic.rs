use std::cell::Cell;

use super::{ForceContext, ForceGenerator};
use crate::core::math::Vector2;
use crate::domain::entity::Body;

/// Uniform gravitational acceleration, scaled by each body's mass.
#[derive(Clone, Debug)]
pub struct Gravity {
    gravity: Vector2,
}

impl Gravity {
    pub fn new(gravity: Vector2) -> Self {
        Self { gravity }
    }

    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }
}

impl<T: Body> ForceGenerator<T> for Gravity {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>) {
        let Some(body) = ctx.target_mut() else { return };
        if !body.has_finite_mass() {
            return;
        }
        let mass = body.mass();
        body.apply_force(self.gravity * mass);
    }

    fn name(&self) -> &'static str {
        "gravity"
    }
}

/// Constant force, independent of mass and elapsed time.
#[derive(Debug)]
pub struct Wind {
    force: Cell<Vector2>,
}

impl Wind {
    pub fn new(force: Vector2) -> Self {
        Self {
            force: Cell::new(force),
        }
    }

    pub fn force(&self) -> Vector2 {
        self.force.get()
    }

    /// Takes effect on the next tick for every body sharing this instance.
    pub fn set_force(&self, force: Vector2) {
        self.force.set(force);
    }
}

impl<T: Body> ForceGenerator<T> for Wind {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>) {
        if let Some(body) = ctx.target_mut() {
            body.apply_force(self.force.get());
        }
    }

    fn name(&self) -> &'static str {
        "wind"
    }
}

/// Velocity drag: `-v̂ (k1 |v| + k2 |v|²)`.
#[derive(Clone, Debug)]
pub struct Drag {
    k1: f64,
    k2: f64,
}

impl Drag {
    pub fn new(k1: f64, k2: f64) -> Self {
        Self { k1, k2 }
    }

    pub fn coefficients(&self) -> (f64, f64) {
        (self.k1, self.k2)
    }
}

impl<T: Body> ForceGenerator<T> for Drag {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>) {
        let Some(body) = ctx.target_mut() else { return };
        let vel = body.velocity();
        // At rest: nothing to oppose
        let Some(direction) = vel.try_normalize() else { return };
        let speed = vel.magnitude();
        let magnitude = self.k1 * speed + self.k2 * speed * speed;
        body.apply_force(-direction * magnitude);
    }

    fn name(&self) -> &'static str {
        "drag"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::EntitySet;
    use crate::systems::forces::test_support::particles;
    use crate::systems::particle::Particle;
    use approx::assert_relative_eq;

    fn run<G: ForceGenerator<Particle>>(g: &G, bodies: &mut EntitySet<Particle>, target: crate::domain::entity::EntityId) {
        let mut ctx = ForceContext {
            target,
            bodies,
            delta_ms: 16.0,
        };
        g.apply_force(&mut ctx);
    }

    #[test]
    fn drag_opposes_velocity() {
        let (mut bodies, ids) = particles(&[Vector2::ZERO]);
        bodies.get_mut(ids[0]).unwrap().vel = Vector2::new(10.0, 0.0);

        run(&Drag::new(1.0, 2.0), &mut bodies, ids[0]);

        let f = bodies.get(ids[0]).unwrap().force_accum();
        assert_relative_eq!(f.magnitude(), 210.0);
        assert_relative_eq!(f.x, -210.0);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn drag_at_rest_adds_nothing() {
        let (mut bodies, ids) = particles(&[Vector2::ZERO]);
        run(&Drag::new(1.0, 2.0), &mut bodies, ids[0]);
        assert_eq!(bodies.get(ids[0]).unwrap().force_accum(), Vector2::ZERO);
    }

    #[test]
    fn gravity_scales_with_mass_and_skips_immovable() {
        let mut bodies = EntitySet::new();
        let heavy = bodies.insert(Particle::new(Vector2::ZERO).with_mass(3.0).unwrap()).unwrap();
        let pinned = bodies.insert(Particle::fixed(Vector2::ZERO)).unwrap();
        let gravity = Gravity::new(Vector2::new(0.0, -10.0));

        run(&gravity, &mut bodies, heavy);
        run(&gravity, &mut bodies, pinned);

        assert_relative_eq!(bodies.get(heavy).unwrap().force_accum().y, -30.0);
        assert_eq!(bodies.get(pinned).unwrap().force_accum(), Vector2::ZERO);
    }

    #[test]
    fn wind_is_adjustable() {
        let (mut bodies, ids) = particles(&[Vector2::ZERO]);
        let wind = Wind::new(Vector2::new(1.0, 0.0));
        run(&wind, &mut bodies, ids[0]);
        wind.set_force(Vector2::new(0.0, 2.0));
        run(&wind, &mut bodies, ids[0]);
        assert_eq!(bodies.get(ids[0]).unwrap().force_accum(), Vector2::new(1.0, 2.0));
    }
}
