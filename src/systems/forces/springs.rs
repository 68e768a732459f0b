use std::cell::Cell;

use super::{bungee_force, spring_force, ForceContext, ForceGenerator};
use crate::core::math::Vector2;
use crate::domain::entity::{Body, EntityId};

/// Spring to another body. Pushes when compressed, pulls when stretched.
///
/// Acts on the registered target only; register a mirrored spring on the
/// other body for a symmetric pair.
#[derive(Clone, Debug)]
pub struct Spring {
    other: EntityId,
    spring_constant: f64,
    rest_length: f64,
}

impl Spring {
    pub fn new(other: EntityId, spring_constant: f64, rest_length: f64) -> Self {
        Self {
            other,
            spring_constant,
            rest_length,
        }
    }

    pub fn other(&self) -> EntityId {
        self.other
    }
}

impl<T: Body> ForceGenerator<T> for Spring {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>) {
        let Some(other_pos) = ctx.body(self.other).map(Body::position) else { return };
        let Some(body) = ctx.target_mut() else { return };
        let delta = body.position() - other_pos;
        if let Some(force) = spring_force(delta, self.spring_constant, self.rest_length) {
            body.apply_force(force);
        }
    }

    fn name(&self) -> &'static str {
        "spring"
    }

    fn references(&self, id: EntityId) -> bool {
        self.other == id
    }
}

/// Spring to a fixed point in world space.
#[derive(Debug)]
pub struct AnchoredSpring {
    anchor: Cell<Vector2>,
    spring_constant: f64,
    rest_length: f64,
}

impl AnchoredSpring {
    pub fn new(anchor: Vector2, spring_constant: f64, rest_length: f64) -> Self {
        Self {
            anchor: Cell::new(anchor),
            spring_constant,
            rest_length,
        }
    }

    pub fn anchor(&self) -> Vector2 {
        self.anchor.get()
    }

    pub fn set_anchor(&self, anchor: Vector2) {
        self.anchor.set(anchor);
    }
}

impl<T: Body> ForceGenerator<T> for AnchoredSpring {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>) {
        let Some(body) = ctx.target_mut() else { return };
        let delta = body.position() - self.anchor.get();
        if let Some(force) = spring_force(delta, self.spring_constant, self.rest_length) {
            body.apply_force(force);
        }
    }

    fn name(&self) -> &'static str {
        "anchored spring"
    }
}

/// Elastic cord to another body: only resists stretching.
#[derive(Clone, Debug)]
pub struct Bungee {
    other: EntityId,
    spring_constant: f64,
    rest_length: f64,
}

impl Bungee {
    pub fn new(other: EntityId, spring_constant: f64, rest_length: f64) -> Self {
        Self {
            other,
            spring_constant,
            rest_length,
        }
    }

    pub fn other(&self) -> EntityId {
        self.other
    }
}

impl<T: Body> ForceGenerator<T> for Bungee {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>) {
        let Some(other_pos) = ctx.body(self.other).map(Body::position) else { return };
        let Some(body) = ctx.target_mut() else { return };
        let delta = body.position() - other_pos;
        if let Some(force) = bungee_force(delta, self.spring_constant, self.rest_length) {
            body.apply_force(force);
        }
    }

    fn name(&self) -> &'static str {
        "bungee"
    }

    fn references(&self, id: EntityId) -> bool {
        self.other == id
    }
}

/// Elastic cord to a fixed point in world space.
#[derive(Debug)]
pub struct AnchoredBungee {
    anchor: Cell<Vector2>,
    spring_constant: f64,
    rest_length: f64,
}

impl AnchoredBungee {
    pub fn new(anchor: Vector2, spring_constant: f64, rest_length: f64) -> Self {
        Self {
            anchor: Cell::new(anchor),
            spring_constant,
            rest_length,
        }
    }

    pub fn anchor(&self) -> Vector2 {
        self.anchor.get()
    }

    pub fn set_anchor(&self, anchor: Vector2) {
        self.anchor.set(anchor);
    }
}

impl<T: Body> ForceGenerator<T> for AnchoredBungee {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>) {
        let Some(body) = ctx.target_mut() else { return };
        let delta = body.position() - self.anchor.get();
        if let Some(force) = bungee_force(delta, self.spring_constant, self.rest_length) {
            body.apply_force(force);
        }
    }

    fn name(&self) -> &'static str {
        "anchored bungee"
    }
}
