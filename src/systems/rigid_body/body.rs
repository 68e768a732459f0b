use crate::core::math::{wrap_angle, Matrix2, Vector2};
use crate::domain::entity::{next_entity_id, Body, EntityId};
use crate::domain::error::{validate_mass, EngineError};
use crate::systems::boundary::BoundaryAction;
use crate::systems::particle::{clamp_damping, DEFAULT_DAMPING};

/// Rigid Body - moves and rotates as a unit
///
/// The orientation angle is the source of truth. The rotation matrix is a
/// cache refreshed by [`RigidBody::calculate_derived_data`], which every
/// angle mutator calls, so the two can never disagree.
#[derive(Debug)]
pub struct RigidBody {
    id: EntityId,

    // === Linear State ===
    /// World position (center of mass)
    pub pos: Vector2,
    /// Velocity (units per second)
    pub vel: Vector2,
    /// Fraction of linear velocity kept after one second
    linear_damping: f64,
    inverse_mass: f64,
    force_accum: Vector2,

    // === Angular State ===
    /// Radians, canonical range (-PI, PI]
    orientation: f64,
    orientation_matrix: Matrix2,
    /// Radians per second, counter-clockwise positive
    pub angular_velocity: f64,
    /// Fraction of angular velocity kept after one second
    angular_damping: f64,
    inverse_inertia: f64,
    torque_accum: f64,

    // === Bounding Box (AABB, unrotated) ===
    pub half_width: f64,
    pub half_height: f64,

    /// Overrides the world's boundary action when set
    pub boundary: Option<BoundaryAction>,
}

impl RigidBody {
    /// Unit mass, unit inertia, facing +X.
    pub fn new(pos: Vector2) -> Self {
        Self {
            id: next_entity_id(),
            pos,
            vel: Vector2::ZERO,
            linear_damping: DEFAULT_DAMPING,
            inverse_mass: 1.0,
            force_accum: Vector2::ZERO,
            orientation: 0.0,
            orientation_matrix: Matrix2::IDENTITY,
            angular_velocity: 0.0,
            angular_damping: DEFAULT_DAMPING,
            inverse_inertia: 1.0,
            torque_accum: 0.0,
            half_width: 0.0,
            half_height: 0.0,
            boundary: None,
        }
    }

    /// Solid rectangle: I = m (w² + h²) / 12
    pub fn new_rect(pos: Vector2, width: f64, height: f64, mass: f64) -> Result<Self, EngineError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(EngineError::invalid(
                "rectangle size",
                format!("width and height must be > 0, got {}x{}", width, height),
            ));
        }
        let mut body = Self::new(pos);
        body.set_mass(mass)?;
        body.set_inertia(mass * (width * width + height * height) / 12.0)?;
        body.half_width = width / 2.0;
        body.half_height = height / 2.0;
        Ok(body)
    }

    /// Solid disc: I = m r² / 2
    pub fn new_circle(pos: Vector2, radius: f64, mass: f64) -> Result<Self, EngineError> {
        if !(radius > 0.0) {
            return Err(EngineError::invalid(
                "circle radius",
                format!("must be > 0, got {}", radius),
            ));
        }
        let mut body = Self::new(pos);
        body.set_mass(mass)?;
        body.set_inertia(0.5 * mass * radius * radius)?;
        body.half_width = radius;
        body.half_height = radius;
        Ok(body)
    }

    pub fn with_velocity(mut self, vel: Vector2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_angular_velocity(mut self, omega: f64) -> Self {
        self.angular_velocity = omega;
        self
    }

    pub fn with_orientation(mut self, angle: f64) -> Self {
        self.set_orientation_angle(angle);
        self
    }

    /// Both dampings are clamped into [0, 1].
    pub fn with_damping(mut self, linear: f64, angular: f64) -> Self {
        self.set_damping(linear, angular);
        self
    }

    pub fn with_boundary(mut self, action: BoundaryAction) -> Self {
        self.boundary = Some(action);
        self
    }

    /// Copy of this body's state under a freshly allocated id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: next_entity_id(),
            pos: self.pos,
            vel: self.vel,
            linear_damping: self.linear_damping,
            inverse_mass: self.inverse_mass,
            force_accum: self.force_accum,
            orientation: self.orientation,
            orientation_matrix: self.orientation_matrix,
            angular_velocity: self.angular_velocity,
            angular_damping: self.angular_damping,
            inverse_inertia: self.inverse_inertia,
            torque_accum: self.torque_accum,
            half_width: self.half_width,
            half_height: self.half_height,
            boundary: self.boundary,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn linear_damping(&self) -> f64 {
        self.linear_damping
    }

    #[inline]
    pub fn angular_damping(&self) -> f64 {
        self.angular_damping
    }

    /// Both clamped into [0, 1].
    pub fn set_damping(&mut self, linear: f64, angular: f64) {
        self.linear_damping = clamp_damping(linear);
        self.angular_damping = clamp_damping(angular);
    }

    // === Mass Properties ===

    /// `mass == 0` stores infinite mass.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), EngineError> {
        validate_mass("mass", mass)?;
        self.inverse_mass = if mass == 0.0 { 0.0 } else { 1.0 / mass };
        Ok(())
    }

    /// `inertia == 0` stores infinite moment of inertia.
    pub fn set_inertia(&mut self, inertia: f64) -> Result<(), EngineError> {
        validate_mass("moment of inertia", inertia)?;
        self.inverse_inertia = if inertia == 0.0 { 0.0 } else { 1.0 / inertia };
        Ok(())
    }

    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    #[inline]
    pub fn inverse_inertia(&self) -> f64 {
        self.inverse_inertia
    }

    #[inline]
    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass != 0.0
    }

    // === Orientation ===

    /// Stores the angle wrapped into (-PI, PI] and refreshes derived data.
    pub fn set_orientation_angle(&mut self, angle: f64) {
        self.orientation = wrap_angle(angle);
        self.calculate_derived_data();
    }

    #[inline]
    pub fn orientation_angle(&self) -> f64 {
        self.orientation
    }

    /// Re-derives the rotation matrix from the angle.
    pub fn calculate_derived_data(&mut self) {
        self.orientation_matrix = Matrix2::from_angle(self.orientation);
    }

    #[inline]
    pub fn orientation_matrix(&self) -> &Matrix2 {
        &self.orientation_matrix
    }

    /// Heading unit vector (first column of the rotation matrix).
    #[inline]
    pub fn orientation(&self) -> Vector2 {
        self.orientation_matrix.column(0)
    }

    /// Body space -> world space: rotate, then translate.
    #[inline]
    pub fn point_in_world_space(&self, local: Vector2) -> Vector2 {
        self.orientation_matrix.mult_vector(local) + self.pos
    }

    /// World space -> body space.
    #[inline]
    pub fn point_in_local_space(&self, world: Vector2) -> Vector2 {
        self.orientation_matrix.transform_transpose(world - self.pos)
    }

    /// Rotates a body-space direction into world space (no translation).
    #[inline]
    pub fn direction_in_world_space(&self, local: Vector2) -> Vector2 {
        self.orientation_matrix.mult_vector(local)
    }

    // === Forces ===

    #[inline]
    pub fn force_accum(&self) -> Vector2 {
        self.force_accum
    }

    #[inline]
    pub fn torque_accum(&self) -> f64 {
        self.torque_accum
    }

    /// Force through the center of mass (no torque).
    #[inline]
    pub fn apply_force(&mut self, force: Vector2) {
        self.force_accum.add_mut(force);
    }

    #[inline]
    pub fn apply_torque(&mut self, torque: f64) {
        self.torque_accum += torque;
    }

    /// Force at a world-space point; the lever arm adds torque.
    pub fn apply_force_at_point(&mut self, force: Vector2, point: Vector2) {
        let arm = point - self.pos;
        self.force_accum.add_mut(force);
        self.torque_accum += arm.cross(force);
    }

    /// Force at a body-space point.
    pub fn apply_force_at_body_point(&mut self, force: Vector2, local: Vector2) {
        let point = self.point_in_world_space(local);
        self.apply_force_at_point(force, point);
    }

    /// Instantaneous velocity change at the center of mass.
    pub fn apply_impulse(&mut self, impulse: Vector2) {
        self.vel.add_scaled_mut(impulse, self.inverse_mass);
    }

    pub fn clear_accumulators(&mut self) {
        self.force_accum.clear();
        self.torque_accum = 0.0;
    }

    /// Advances linear and angular state by `delta_ms` milliseconds, then
    /// clears both accumulators and refreshes derived data.
    pub fn integrate(&mut self, delta_ms: f64) {
        let dt = delta_ms / 1000.0;
        if dt > 0.0 {
            if self.inverse_mass != 0.0 {
                self.vel.mult_scalar_mut(self.linear_damping.powf(dt));
                self.vel.add_scaled_mut(self.force_accum, self.inverse_mass * dt);
                self.pos.add_scaled_mut(self.vel, dt);
            }

            self.angular_velocity = self.angular_velocity * self.angular_damping.powf(dt)
                + self.torque_accum * self.inverse_inertia * dt;
            self.orientation = wrap_angle(self.orientation + self.angular_velocity * dt);

            debug_finite!(self.pos, "rigid body position");
            debug_assert!(self.orientation.is_finite(), "rigid body orientation is not finite");
        }

        self.clear_accumulators();
        self.calculate_derived_data();
    }
}

impl Body for RigidBody {
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
        RigidBody::apply_force(self, force);
    }

    fn integrate(&mut self, delta_ms: f64) {
        RigidBody::integrate(self, delta_ms);
    }

    fn clear_accumulators(&mut self) {
        RigidBody::clear_accumulators(self);
    }

    fn half_extents(&self) -> Vector2 {
        Vector2::new(self.half_width, self.half_height)
    }

    fn boundary_override(&self) -> Option<BoundaryAction> {
        self.boundary
    }

    fn orientation_angle(&self) -> Option<f64> {
        Some(self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn damping_setter_clamps_both_terms() {
        let mut body = RigidBody::new(Vector2::ZERO).with_angular_velocity(2.0);
        body.set_damping(-1.0, 4.0);
        assert_eq!(body.linear_damping(), 0.0);
        assert_eq!(body.angular_damping(), 1.0);

        body.integrate(250.0);
        assert!(body.angular_velocity.is_finite());
        assert_eq!(body.angular_velocity, 2.0);
    }

    #[test]
    fn duplicate_keeps_orientation_cache_in_step() {
        let body = RigidBody::new(Vector2::ZERO).with_orientation(FRAC_PI_2);
        let twin = body.duplicate();
        assert_ne!(twin.id(), body.id());
        assert_eq!(twin.orientation_angle(), body.orientation_angle());
        assert_eq!(twin.orientation_matrix(), body.orientation_matrix());
    }

    #[test]
    fn three_quarter_turn_points_down() {
        let mut body = RigidBody::new(Vector2::ZERO);
        body.set_orientation_angle(3.0 * PI / 2.0);
        body.calculate_derived_data();

        let heading = body.orientation();
        assert_abs_diff_eq!(heading.x, 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(heading.y, -1.0, epsilon = 0.01);

        // Same angle modulo 2PI, stored canonically
        let angle = body.orientation_angle();
        assert_abs_diff_eq!(angle, -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!((angle - 3.0 * PI / 2.0).rem_euclid(2.0 * PI), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn matrix_tracks_angle_after_every_mutation() {
        let mut body = RigidBody::new(Vector2::ZERO).with_angular_velocity(1.0);
        body.set_orientation_angle(0.3);
        assert_eq!(*body.orientation_matrix(), Matrix2::from_angle(body.orientation_angle()));

        body.integrate(500.0);
        let expected = Matrix2::from_angle(body.orientation_angle());
        assert!(body.orientation_matrix().approx_eq(&expected, 1e-12));
    }

    #[test]
    fn world_and_local_space_round_trip() {
        let body = RigidBody::new(Vector2::new(10.0, 5.0)).with_orientation(FRAC_PI_2);
        let world = body.point_in_world_space(Vector2::new(2.0, 0.0));
        assert_abs_diff_eq!(world.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(world.y, 7.0, epsilon = 1e-12);

        let local = body.point_in_local_space(world);
        assert_abs_diff_eq!(local.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(local.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn off_center_force_adds_torque() {
        let mut body = RigidBody::new(Vector2::new(1.0, 1.0));
        body.apply_force_at_point(Vector2::new(0.0, 2.0), Vector2::new(3.0, 1.0));
        assert_eq!(body.force_accum(), Vector2::new(0.0, 2.0));
        // (2, 0) x (0, 2) = 4
        assert_eq!(body.torque_accum(), 4.0);

        body.apply_force(Vector2::new(1.0, 0.0));
        assert_eq!(body.torque_accum(), 4.0);
    }

    #[test]
    fn integrate_spins_and_clears_accumulators() {
        let mut body = RigidBody::new(Vector2::ZERO).with_damping(1.0, 1.0);
        body.apply_torque(PI / 2.0);
        body.apply_force(Vector2::new(2.0, 0.0));
        body.integrate(1000.0);

        assert_abs_diff_eq!(body.angular_velocity, PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body.orientation_angle(), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body.vel.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body.pos.x, 2.0, epsilon = 1e-12);
        assert_eq!(body.force_accum(), Vector2::ZERO);
        assert_eq!(body.torque_accum(), 0.0);
    }

    #[test]
    fn angle_wraps_across_pi() {
        let mut body = RigidBody::new(Vector2::ZERO)
            .with_damping(1.0, 1.0)
            .with_orientation(PI - 0.1)
            .with_angular_velocity(0.2);
        body.integrate(1000.0);
        assert_abs_diff_eq!(body.orientation_angle(), -PI + 0.1, epsilon = 1e-12);
    }

    #[test]
    fn immovable_body_keeps_position() {
        let mut body = RigidBody::new_rect(Vector2::new(4.0, 4.0), 2.0, 2.0, 0.0).unwrap();
        body.apply_force(Vector2::new(100.0, 100.0));
        body.integrate(1000.0);
        assert_eq!(body.pos, Vector2::new(4.0, 4.0));
        assert_eq!(body.vel, Vector2::ZERO);
    }

    #[test]
    fn shape_constructors_compute_inertia() {
        let rect = RigidBody::new_rect(Vector2::ZERO, 3.0, 4.0, 12.0).unwrap();
        assert_abs_diff_eq!(rect.inverse_inertia(), 1.0 / 25.0, epsilon = 1e-12);
        assert_eq!(Body::half_extents(&rect), Vector2::new(1.5, 2.0));

        let disc = RigidBody::new_circle(Vector2::ZERO, 2.0, 1.0).unwrap();
        assert_abs_diff_eq!(disc.inverse_inertia(), 0.5, epsilon = 1e-12);

        assert!(RigidBody::new_rect(Vector2::ZERO, 0.0, 1.0, 1.0).is_err());
        assert!(RigidBody::new_circle(Vector2::ZERO, 1.0, -2.0).is_err());
    }

    #[test]
    fn impulse_scales_with_inverse_mass() {
        let mut body = RigidBody::new_circle(Vector2::ZERO, 1.0, 2.0).unwrap();
        body.apply_impulse(Vector2::new(4.0, 0.0));
        assert_eq!(body.vel, Vector2::new(2.0, 0.0));
    }
}
