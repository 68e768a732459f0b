use crate::core::trail_buffer::TrailBuffer;
use crate::domain::entity::{Body, EntityId};
use crate::domain::error::EngineError;

use super::WorldCore;

pub(super) fn add_entity<T: Body>(world: &mut WorldCore<T>, body: T) -> Result<EntityId, EngineError> {
    let id = world.bodies.insert(body)?;
    if world.trail_length > 0 {
        if let Ok(trail) = TrailBuffer::new(world.trail_length) {
            world.trails.insert(id, trail);
        }
    }
    Ok(id)
}

pub(super) fn remove_entity<T: Body>(world: &mut WorldCore<T>, id: EntityId) -> Option<T> {
    let body = world.bodies.remove(id)?;
    forget(world, id);
    Some(body)
}

/// Drops everything the world keeps about `id` besides the body itself.
pub(super) fn forget<T: Body>(world: &mut WorldCore<T>, id: EntityId) {
    world.registry.remove_force_generators(id);
    world.registry.remove_references_to(id);
    world.contacts.forget_entity(id);
    world.trails.remove(&id);
}

pub(super) fn clear<T: Body>(world: &mut WorldCore<T>) {
    world.bodies.clear();
    world.registry.clear();
    world.contacts.reset();
    world.trails.clear();
    world.last_contacts.clear();
}
