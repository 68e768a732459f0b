use std::cell::Cell;

use super::{spring_force, ForceContext, ForceGenerator};
use crate::core::math::Vector2;
use crate::domain::entity::EntityId;
use crate::systems::rigid_body::RigidBody;

/// Fixed torque, e.g. a motor or a spinning demo.
#[derive(Debug)]
pub struct ConstantTorque {
    torque: Cell<f64>,
}

impl ConstantTorque {
    pub fn new(torque: f64) -> Self {
        Self {
            torque: Cell::new(torque),
        }
    }

    pub fn torque(&self) -> f64 {
        self.torque.get()
    }

    pub fn set_torque(&self, torque: f64) {
        self.torque.set(torque);
    }
}

impl ForceGenerator<RigidBody> for ConstantTorque {
    fn apply_force(&self, ctx: &mut ForceContext<'_, RigidBody>) {
        if let Some(body) = ctx.target_mut() {
            body.apply_torque(self.torque.get());
        }
    }

    fn name(&self) -> &'static str {
        "torque"
    }
}

/// Spring between points fixed on two rigid bodies.
///
/// The force is applied at the target's connection point, so anything off
/// the centre of mass also spins the body.
#[derive(Clone, Debug)]
pub struct BodySpring {
    connection_point: Vector2,
    other: EntityId,
    other_connection_point: Vector2,
    spring_constant: f64,
    rest_length: f64,
}

impl BodySpring {
    pub fn new(
        connection_point: Vector2,
        other: EntityId,
        other_connection_point: Vector2,
        spring_constant: f64,
        rest_length: f64,
    ) -> Self {
        Self {
            connection_point,
            other,
            other_connection_point,
            spring_constant,
            rest_length,
        }
    }
}

impl ForceGenerator<RigidBody> for BodySpring {
    fn apply_force(&self, ctx: &mut ForceContext<'_, RigidBody>) {
        let Some(other_end) = ctx
            .body(self.other)
            .map(|b| b.point_in_world_space(self.other_connection_point))
        else {
            return;
        };
        let Some(body) = ctx.target_mut() else { return };
        let this_end = body.point_in_world_space(self.connection_point);
        if let Some(force) = spring_force(this_end - other_end, self.spring_constant, self.rest_length) {
            body.apply_force_at_point(force, this_end);
        }
    }

    fn name(&self) -> &'static str {
        "body spring"
    }

    fn references(&self, id: EntityId) -> bool {
        self.other == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::EntitySet;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_torque_accumulates() {
        let mut bodies = EntitySet::new();
        let id = bodies.insert(RigidBody::new(Vector2::ZERO)).unwrap();
        let motor = ConstantTorque::new(1.5);

        for _ in 0..2 {
            let mut ctx = ForceContext {
                target: id,
                bodies: &mut bodies,
                delta_ms: 16.0,
            };
            motor.apply_force(&mut ctx);
        }
        assert_eq!(bodies.get(id).unwrap().torque_accum(), 3.0);
    }

    #[test]
    fn body_spring_pulls_connection_point() {
        let mut bodies = EntitySet::new();
        let a = bodies.insert(RigidBody::new(Vector2::ZERO)).unwrap();
        let b = bodies.insert(RigidBody::new(Vector2::new(0.0, 10.0))).unwrap();

        // Connection on a's right edge, rest length 0
        let spring = BodySpring::new(Vector2::new(1.0, 0.0), b, Vector2::ZERO, 2.0, 0.0);
        let mut ctx = ForceContext {
            target: a,
            bodies: &mut bodies,
            delta_ms: 16.0,
        };
        spring.apply_force(&mut ctx);

        let body = bodies.get(a).unwrap();
        // delta = (1, -10); force = -2 * delta
        assert_abs_diff_eq!(body.force_accum().x, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body.force_accum().y, 20.0, epsilon = 1e-12);
        // (1, 0) x (-2, 20) = 20
        assert_abs_diff_eq!(body.torque_accum(), 20.0, epsilon = 1e-12);
    }
}
