//! Entity identity, the `Body` capability, and the owning body set.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use crate::core::math::Vector2;
use crate::domain::error::EngineError;
use crate::systems::boundary::BoundaryAction;

/// Unique, monotonically increasing body id assigned at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(1);

/// Allocates the next id. Ids are never reused within a process.
pub(crate) fn next_entity_id() -> EntityId {
    EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
}

/// Anything the world can push around: particles and rigid bodies.
pub trait Body {
    fn id(&self) -> EntityId;

    fn position(&self) -> Vector2;
    fn set_position(&mut self, pos: Vector2);

    fn velocity(&self) -> Vector2;
    fn set_velocity(&mut self, vel: Vector2);

    /// 0 encodes infinite mass.
    fn inverse_mass(&self) -> f64;

    fn has_finite_mass(&self) -> bool {
        self.inverse_mass() != 0.0
    }

    /// `f64::INFINITY` for immovable bodies.
    fn mass(&self) -> f64 {
        let inv = self.inverse_mass();
        if inv == 0.0 {
            f64::INFINITY
        } else {
            1.0 / inv
        }
    }

    /// Adds to the force accumulator.
    fn apply_force(&mut self, force: Vector2);

    /// Advances state by `delta_ms` milliseconds.
    fn integrate(&mut self, delta_ms: f64);

    /// Resets force (and torque) accumulators.
    fn clear_accumulators(&mut self);

    /// Half width/height of the axis-aligned bounding box.
    fn half_extents(&self) -> Vector2;

    /// Per-body boundary policy; `None` defers to the world default.
    fn boundary_override(&self) -> Option<BoundaryAction>;

    /// Orientation in radians for bodies that have one.
    fn orientation_angle(&self) -> Option<f64> {
        None
    }

    /// Non-strict: a body exactly `radius` away counts as close.
    fn is_close_to_point(&self, point: Vector2, radius: f64) -> bool {
        self.position().distance(point) <= radius
    }
}

/// Bodies keyed by id, iterated in id (= creation) order.
pub struct EntitySet<T> {
    items: BTreeMap<EntityId, T>,
}

impl<T: Body> EntitySet<T> {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Inserts a body. An id that is already present is rejected and the
    /// stored body is left untouched.
    pub fn insert(&mut self, body: T) -> Result<EntityId, EngineError> {
        let id = body.id();
        match self.items.entry(id) {
            Entry::Occupied(_) => Err(EngineError::invalid("entity id", format!("{} is already in the world", id))),
            Entry::Vacant(slot) => {
                slot.insert(body);
                Ok(id)
            }
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.items.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.values_mut()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.items.keys().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Body> Default for EntitySet<T> {
    fn default() -> Self {
        Self::new()
    }
}
