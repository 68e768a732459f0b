//! Boundary actions - what happens when a body leaves the world rectangle
//!
//! Actions are plain values dispatched by [`apply_boundary`]; nothing is
//! shared between bodies.

use serde::{Deserialize, Serialize};

use crate::core::math::Vector2;
use crate::domain::entity::Body;
use crate::domain::error::EngineError;

/// Axis-aligned world rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector2,
    pub max: Vector2,
}

impl Bounds {
    pub fn new(min: Vector2, max: Vector2) -> Result<Self, EngineError> {
        if !(min.x < max.x && min.y < max.y) {
            return Err(EngineError::invalid(
                "bounds",
                format!("min {:?} must be strictly below max {:?}", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Policy applied when a body crosses the world boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BoundaryAction {
    /// Ignore the boundary.
    None,
    /// Reflect the offending velocity component, scaled by `restitution`.
    Bounce { restitution: f64 },
    /// Re-enter from the opposite edge.
    Wrap,
    /// Despawn once the bounding box is fully outside.
    Die,
}

impl Default for BoundaryAction {
    fn default() -> Self {
        BoundaryAction::None
    }
}

impl BoundaryAction {
    /// Parses `none`, `bounce`, `wrap` or `die`; `restitution` only matters
    /// for `bounce`.
    pub fn from_name(name: &str, restitution: f64) -> Result<Self, EngineError> {
        match name {
            "none" => Ok(BoundaryAction::None),
            "bounce" => {
                if !(0.0..=1.0).contains(&restitution) {
                    return Err(EngineError::invalid(
                        "restitution",
                        format!("must be within [0, 1], got {}", restitution),
                    ));
                }
                Ok(BoundaryAction::Bounce { restitution })
            }
            "wrap" => Ok(BoundaryAction::Wrap),
            "die" => Ok(BoundaryAction::Die),
            _ => Err(EngineError::invalid(
                "boundary action",
                format!("unknown boundary action: {}", name),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoundaryAction::None => "none",
            BoundaryAction::Bounce { .. } => "bounce",
            BoundaryAction::Wrap => "wrap",
            BoundaryAction::Die => "die",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryOutcome {
    /// Body untouched.
    Inside,
    /// Position and/or velocity were corrected.
    Adjusted,
    /// Body must be removed from the world.
    Removed,
}

/// Applies `action` to `body` against `bounds`.
pub fn apply_boundary<T: Body>(action: BoundaryAction, body: &mut T, bounds: &Bounds) -> BoundaryOutcome {
    match action {
        BoundaryAction::None => BoundaryOutcome::Inside,
        BoundaryAction::Bounce { restitution } => bounce(body, bounds, restitution),
        BoundaryAction::Wrap => wrap(body, bounds),
        BoundaryAction::Die => {
            if fully_outside(body, bounds) {
                BoundaryOutcome::Removed
            } else {
                BoundaryOutcome::Inside
            }
        }
    }
}

fn bounce<T: Body>(body: &mut T, bounds: &Bounds, restitution: f64) -> BoundaryOutcome {
    let half = body.half_extents();
    let mut pos = body.position();
    let mut vel = body.velocity();

    // Per-axis (cheap + deterministic)
    let hit_x = bounce_axis(&mut pos.x, &mut vel.x, half.x, bounds.min.x, bounds.max.x, restitution);
    let hit_y = bounce_axis(&mut pos.y, &mut vel.y, half.y, bounds.min.y, bounds.max.y, restitution);

    if !(hit_x || hit_y) {
        return BoundaryOutcome::Inside;
    }
    body.set_position(pos);
    body.set_velocity(vel);
    BoundaryOutcome::Adjusted
}

/// One axis of a bounce; returns whether anything changed.
///
/// A body wider than the bounds on this axis cannot fit, so it is pinned
/// to the centre with its velocity on the axis removed.
fn bounce_axis(pos: &mut f64, vel: &mut f64, half: f64, min: f64, max: f64, restitution: f64) -> bool {
    if 2.0 * half > max - min {
        let centre = 0.5 * (min + max);
        if *pos == centre && *vel == 0.0 {
            return false;
        }
        *pos = centre;
        *vel = 0.0;
        return true;
    }

    if *pos - half < min {
        *pos = min + half;
        if *vel < 0.0 {
            *vel = -*vel * restitution;
        }
        true
    } else if *pos + half > max {
        *pos = max - half;
        if *vel > 0.0 {
            *vel = -*vel * restitution;
        }
        true
    } else {
        false
    }
}

/// Folds `p` back into `[min, max)` however far outside it is.
#[inline]
fn fold(p: f64, min: f64, max: f64) -> f64 {
    min + (p - min).rem_euclid(max - min)
}

fn wrap<T: Body>(body: &mut T, bounds: &Bounds) -> BoundaryOutcome {
    let mut pos = body.position();
    let mut adjusted = false;

    if pos.x < bounds.min.x || pos.x > bounds.max.x {
        pos.x = fold(pos.x, bounds.min.x, bounds.max.x);
        adjusted = true;
    }

    if pos.y < bounds.min.y || pos.y > bounds.max.y {
        pos.y = fold(pos.y, bounds.min.y, bounds.max.y);
        adjusted = true;
    }

    if !adjusted {
        return BoundaryOutcome::Inside;
    }
    body.set_position(pos);
    BoundaryOutcome::Adjusted
}

fn fully_outside<T: Body>(body: &T, bounds: &Bounds) -> bool {
    let half = body.half_extents();
    let pos = body.position();
    pos.x + half.x < bounds.min.x
        || pos.x - half.x > bounds.max.x
        || pos.y + half.y < bounds.min.y
        || pos.y - half.y > bounds.max.y
}
