//! Contact triggers - threshold crossings, not collision resolution
//!
//! A trigger is a static region (half-plane or disc). When a body enters
//! one, a [`ContactEvent`] goes to every listener, which may push the body
//! back out. Staying inside raises nothing further; leaving re-arms it.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::core::math::Vector2;
use crate::domain::entity::{Body, EntityId, EntitySet};
use crate::domain::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TriggerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u32);

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger {}", self.0)
    }
}

/// Region that raises contacts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactTrigger {
    /// Everything on the far side of the line through `point`, where
    /// `normal` (unit) points back toward the open side.
    Plane { point: Vector2, normal: Vector2 },
    /// Disc around `center`.
    Circle { center: Vector2, radius: f64 },
}

impl ContactTrigger {
    /// Normalizes `normal`; a zero normal is rejected.
    pub fn plane(point: Vector2, normal: Vector2) -> Result<Self, EngineError> {
        let normal = normal
            .try_normalize()
            .ok_or_else(|| EngineError::invalid("plane normal", "must be non-zero"))?;
        Ok(ContactTrigger::Plane { point, normal })
    }

    pub fn circle(center: Vector2, radius: f64) -> Result<Self, EngineError> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(EngineError::invalid(
                "trigger radius",
                format!("must be finite and >= 0, got {}", radius),
            ));
        }
        Ok(ContactTrigger::Circle { center, radius })
    }

    /// `(penetration, normal)` when `body` touches the region. Touching
    /// exactly (zero penetration) counts.
    pub fn contact_with<T: Body>(&self, body: &T) -> Option<(f64, Vector2)> {
        let pos = body.position();
        let half = body.half_extents();
        match *self {
            ContactTrigger::Plane { point, normal } => {
                let distance = (pos - point).dot_product(normal);
                let reach = normal.x.abs() * half.x + normal.y.abs() * half.y;
                let penetration = reach - distance;
                (penetration >= 0.0).then_some((penetration, normal))
            }
            ContactTrigger::Circle { center, radius } => {
                let reach = radius + half.x.max(half.y);
                if !body.is_close_to_point(center, reach) {
                    return None;
                }
                let offset = pos - center;
                let normal = offset.try_normalize().unwrap_or(Vector2::Y);
                Some((reach - offset.magnitude(), normal))
            }
        }
    }
}

/// What listeners receive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEvent {
    pub entity: EntityId,
    pub trigger: TriggerId,
    /// How far the body reaches into the region, >= 0
    pub penetration: f64,
    /// Unit vector pointing out of the region
    pub normal: Vector2,
}

type Listener<T> = Box<dyn FnMut(&ContactEvent, &mut T)>;

/// Owns triggers and listeners, and remembers which bodies are inside which
/// trigger so only entries are reported.
pub struct ContactDispatcher<T> {
    triggers: Vec<(TriggerId, ContactTrigger)>,
    listeners: Vec<(ListenerId, Listener<T>)>,
    touching: BTreeSet<(EntityId, TriggerId)>,
    next_trigger: u32,
    next_listener: u32,
}

impl<T: Body> ContactDispatcher<T> {
    pub fn new() -> Self {
        Self {
            triggers: Vec::new(),
            listeners: Vec::new(),
            touching: BTreeSet::new(),
            next_trigger: 1,
            next_listener: 1,
        }
    }

    pub fn add_trigger(&mut self, trigger: ContactTrigger) -> TriggerId {
        let id = TriggerId(self.next_trigger);
        self.next_trigger += 1;
        self.triggers.push((id, trigger));
        id
    }

    pub fn remove_trigger(&mut self, id: TriggerId) -> Option<ContactTrigger> {
        let index = self.triggers.iter().position(|(t, _)| *t == id)?;
        self.touching.retain(|(_, t)| *t != id);
        Some(self.triggers.remove(index).1)
    }

    pub fn trigger(&self, id: TriggerId) -> Option<&ContactTrigger> {
        self.triggers.iter().find(|(t, _)| *t == id).map(|(_, trigger)| trigger)
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Listeners run in registration order and may mutate the body.
    pub fn on_contact<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ContactEvent, &mut T) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_touching(&self, entity: EntityId, trigger: TriggerId) -> bool {
        self.touching.contains(&(entity, trigger))
    }

    /// Drops contact memory for a body that left the world.
    pub fn forget_entity(&mut self, entity: EntityId) {
        self.touching.retain(|(e, _)| *e != entity);
    }

    /// Forgets every body; triggers and listeners stay.
    pub fn reset(&mut self) {
        self.touching.clear();
    }

    /// Checks every body against every trigger and notifies listeners of new
    /// contacts. Returns the raised events in body-id, then trigger order.
    pub fn dispatch(&mut self, bodies: &mut EntitySet<T>) -> Vec<ContactEvent> {
        if self.triggers.is_empty() {
            return Vec::new();
        }

        let mut events = Vec::new();
        for body in bodies.iter() {
            let entity = body.id();
            for (trigger_id, trigger) in &self.triggers {
                let key = (entity, *trigger_id);
                match trigger.contact_with(body) {
                    Some((penetration, normal)) => {
                        if self.touching.insert(key) {
                            events.push(ContactEvent {
                                entity,
                                trigger: *trigger_id,
                                penetration,
                                normal,
                            });
                        }
                    }
                    None => {
                        self.touching.remove(&key);
                    }
                }
            }
        }

        for event in &events {
            let Some(body) = bodies.get_mut(event.entity) else { continue };
            for (_, listener) in self.listeners.iter_mut() {
                listener(event, body);
            }
        }
        events
    }
}

impl<T: Body> Default for ContactDispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::particle::Particle;
    use std::cell::Cell;
    use std::rc::Rc;

    fn floor() -> ContactTrigger {
        ContactTrigger::plane(Vector2::ZERO, Vector2::Y).unwrap()
    }

    #[test]
    fn zero_plane_normal_is_rejected() {
        assert!(ContactTrigger::plane(Vector2::ZERO, Vector2::ZERO).is_err());
        assert!(ContactTrigger::circle(Vector2::ZERO, -1.0).is_err());
        match ContactTrigger::plane(Vector2::ZERO, Vector2::new(0.0, 5.0)).unwrap() {
            ContactTrigger::Plane { normal, .. } => assert_eq!(normal, Vector2::Y),
            other => panic!("unexpected trigger {:?}", other),
        }
    }

    #[test]
    fn plane_contact_accounts_for_radius() {
        let p = Particle::new(Vector2::new(3.0, 0.5)).with_radius(1.0);
        let (penetration, normal) = floor().contact_with(&p).unwrap();
        assert_eq!(penetration, 0.5);
        assert_eq!(normal, Vector2::Y);

        let above = Particle::new(Vector2::new(3.0, 1.5)).with_radius(1.0);
        assert!(floor().contact_with(&above).is_none());
    }

    #[test]
    fn circle_contact_is_inclusive() {
        let trigger = ContactTrigger::circle(Vector2::ZERO, 2.0).unwrap();
        let edge = Particle::new(Vector2::new(3.0, 0.0)).with_radius(1.0);
        let (penetration, normal) = trigger.contact_with(&edge).unwrap();
        assert_eq!(penetration, 0.0);
        assert_eq!(normal, Vector2::X);

        // One ulp past the edge is out
        let outside = Particle::new(Vector2::new(f64::from_bits(3.0f64.to_bits() + 1), 0.0)).with_radius(1.0);
        assert!(trigger.contact_with(&outside).is_none());
    }

    #[test]
    fn contact_is_raised_on_entry_only() {
        let mut bodies = EntitySet::new();
        let id = bodies.insert(Particle::new(Vector2::new(0.0, -1.0))).unwrap();
        let mut contacts = ContactDispatcher::new();
        let floor_id = contacts.add_trigger(floor());

        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        contacts.on_contact(move |event: &ContactEvent, _: &mut Particle| {
            assert_eq!(event.trigger, floor_id);
            seen.set(seen.get() + 1);
        });

        assert_eq!(contacts.dispatch(&mut bodies).len(), 1);
        assert!(contacts.is_touching(id, floor_id));
        // Still inside: nothing new
        assert!(contacts.dispatch(&mut bodies).is_empty());
        assert_eq!(hits.get(), 1);

        // Leave, then come back
        bodies.get_mut(id).unwrap().pos = Vector2::new(0.0, 5.0);
        contacts.dispatch(&mut bodies);
        assert!(!contacts.is_touching(id, floor_id));
        bodies.get_mut(id).unwrap().pos = Vector2::new(0.0, -0.5);
        contacts.dispatch(&mut bodies);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn listener_can_reset_the_body() {
        let mut bodies = EntitySet::new();
        let id = bodies.insert(Particle::new(Vector2::new(0.0, -2.0)).with_velocity(Vector2::new(0.0, -3.0))).unwrap();
        let mut contacts = ContactDispatcher::new();
        contacts.add_trigger(floor());
        contacts.on_contact(|_: &ContactEvent, p: &mut Particle| {
            p.pos = Vector2::new(0.0, 10.0);
            p.vel = Vector2::ZERO;
        });

        contacts.dispatch(&mut bodies);
        let p = bodies.get(id).unwrap();
        assert_eq!(p.pos, Vector2::new(0.0, 10.0));
        assert_eq!(p.vel, Vector2::ZERO);
    }

    #[test]
    fn removed_listener_is_silent() {
        let mut bodies = EntitySet::new();
        bodies.insert(Particle::new(Vector2::new(0.0, -1.0))).unwrap();
        let mut contacts = ContactDispatcher::new();
        contacts.add_trigger(floor());

        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let listener = contacts.on_contact(move |_: &ContactEvent, _: &mut Particle| seen.set(seen.get() + 1));
        assert!(contacts.remove_listener(listener));
        assert!(!contacts.remove_listener(listener));

        assert_eq!(contacts.dispatch(&mut bodies).len(), 1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn forgetting_an_entity_re_arms_it() {
        let mut bodies = EntitySet::new();
        let id = bodies.insert(Particle::new(Vector2::new(0.0, -1.0))).unwrap();
        let mut contacts = ContactDispatcher::new();
        let trigger = contacts.add_trigger(floor());

        contacts.dispatch(&mut bodies);
        contacts.forget_entity(id);
        assert_eq!(contacts.dispatch(&mut bodies).len(), 1);

        assert!(contacts.remove_trigger(trigger).is_some());
        assert!(!contacts.is_touching(id, trigger));
        assert_eq!(contacts.trigger_count(), 0);
    }
}
