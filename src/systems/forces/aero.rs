use std::cell::Cell;

use super::{ForceContext, ForceGenerator};
use crate::core::math::{Matrix2, Vector2};
use crate::systems::rigid_body::RigidBody;

/// Aerodynamic force from a fixed tensor, e.g. a wing or a sail.
///
/// The air velocity relative to the body is rotated into body space, mapped
/// through the tensor, rotated back and applied at `position` (body space),
/// so an off-centre surface also produces torque.
#[derive(Debug)]
pub struct Aero {
    tensor: Matrix2,
    position: Vector2,
    wind: Cell<Vector2>,
}

impl Aero {
    pub fn new(tensor: Matrix2, position: Vector2, wind: Vector2) -> Self {
        Self {
            tensor,
            position,
            wind: Cell::new(wind),
        }
    }

    pub fn tensor(&self) -> Matrix2 {
        self.tensor
    }

    pub fn set_wind(&self, wind: Vector2) {
        self.wind.set(wind);
    }
}

impl ForceGenerator<RigidBody> for Aero {
    fn apply_force(&self, ctx: &mut ForceContext<'_, RigidBody>) {
        if let Some(body) = ctx.target_mut() {
            apply_aero(body, &self.tensor, self.position, self.wind.get());
        }
    }

    fn name(&self) -> &'static str {
        "aero"
    }
}

/// Control surface (rudder, aileron) whose tensor depends on a setting.
///
/// The setting lives in [-1, 1]: -1 selects `min`, 0 `base`, 1 `max`, and
/// values in between blend the neighbouring pair entry-wise.
#[derive(Debug)]
pub struct AeroControl {
    base: Matrix2,
    min: Matrix2,
    max: Matrix2,
    position: Vector2,
    wind: Cell<Vector2>,
    control_setting: Cell<f64>,
}

impl AeroControl {
    pub fn new(base: Matrix2, min: Matrix2, max: Matrix2, position: Vector2, wind: Vector2) -> Self {
        Self {
            base,
            min,
            max,
            position,
            wind: Cell::new(wind),
            control_setting: Cell::new(0.0),
        }
    }

    /// Clamped into [-1, 1].
    pub fn set_control(&self, value: f64) {
        self.control_setting.set(value.clamp(-1.0, 1.0));
    }

    pub fn control(&self) -> f64 {
        self.control_setting.get()
    }

    pub fn set_wind(&self, wind: Vector2) {
        self.wind.set(wind);
    }

    /// Tensor for the current control setting.
    pub fn tensor(&self) -> Matrix2 {
        let c = self.control_setting.get();
        if c <= -1.0 {
            self.min
        } else if c >= 1.0 {
            self.max
        } else if c < 0.0 {
            self.min.lerp(&self.base, c + 1.0)
        } else if c > 0.0 {
            self.base.lerp(&self.max, c)
        } else {
            self.base
        }
    }
}

impl ForceGenerator<RigidBody> for AeroControl {
    fn apply_force(&self, ctx: &mut ForceContext<'_, RigidBody>) {
        let tensor = self.tensor();
        if let Some(body) = ctx.target_mut() {
            apply_aero(body, &tensor, self.position, self.wind.get());
        }
    }

    fn name(&self) -> &'static str {
        "aero control"
    }
}

fn apply_aero(body: &mut RigidBody, tensor: &Matrix2, position: Vector2, wind: Vector2) {
    let velocity = body.vel + wind;
    let rotation = *body.orientation_matrix();
    let body_velocity = rotation.transform_transpose(velocity);
    let body_force = tensor.mult_vector(body_velocity);
    let force = rotation.mult_vector(body_force);
    body.apply_force_at_body_point(force, position);
}
