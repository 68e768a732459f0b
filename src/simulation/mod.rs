//! World - owns the bodies and the force registry, advances them per tick
//!
//! Orchestration only: forces live in systems/forces, integration in the
//! body types, boundary rules in systems/boundary, triggers in
//! systems/contact. One `update` runs, in order:
//!
//! 1. force generators fill accumulators
//! 2. every body integrates and clears its accumulators
//! 3. boundary actions (despawned bodies leave the registry too)
//! 4. contact triggers notify listeners
//! 5. trails, perf stats, frame counter

use std::collections::BTreeMap;

use crate::core::math::Vector2;
use crate::core::trail_buffer::TrailBuffer;
use crate::domain::config::WorldConfig;
use crate::domain::entity::{Body, EntityId, EntitySet};
use crate::domain::error::EngineError;
use crate::systems::boundary::{BoundaryAction, Bounds};
use crate::systems::contact::{ContactDispatcher, ContactEvent, ContactTrigger, ListenerId, TriggerId};
use crate::systems::forces::ForceRegistry;
use crate::systems::particle::Particle;
use crate::systems::rigid_body::RigidBody;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "snapshot/snapshot.rs"]
mod snapshot;
mod facade;

pub use facade::{ParticleWorld, RigidBodyWorld};
pub use perf_stats::PerfStats;
pub use snapshot::{EntitySnapshot, WorldSnapshot};

use perf_timer::PerfTimer;

/// World of point masses.
pub type ParticleWorldCore = WorldCore<Particle>;
/// World of rigid bodies.
pub type RigidWorldCore = WorldCore<RigidBody>;

/// The simulation world
pub struct WorldCore<T: Body> {
    bodies: EntitySet<T>,
    registry: ForceRegistry<T>,
    contacts: ContactDispatcher<T>,

    // Settings
    bounds: Option<Bounds>,
    boundary: BoundaryAction,
    trail_length: usize,

    // State
    trails: BTreeMap<EntityId, TrailBuffer>,
    last_contacts: Vec<ContactEvent>,
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl<T: Body> WorldCore<T> {
    /// Unbounded world, no trails, perf off.
    pub fn new() -> Self {
        init::create_world_core(&WorldConfig::default())
    }

    pub fn with_config(config: &WorldConfig) -> Self {
        init::create_world_core(config)
    }

    pub fn from_config_json(json: &str) -> Result<Self, EngineError> {
        init::create_world_core_from_json(json)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    // === Settings ===

    /// Enable or disable per-update perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last update's perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::perf_stats(self)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// `None` turns boundary handling off regardless of the action.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        settings::set_bounds(self, bounds);
    }

    pub fn boundary_action(&self) -> BoundaryAction {
        self.boundary
    }

    /// World default; a body's own override still wins.
    pub fn set_boundary_action(&mut self, action: BoundaryAction) {
        settings::set_boundary_action(self, action);
    }

    pub fn trail_length(&self) -> usize {
        self.trail_length
    }

    /// 0 disables trails and drops recorded history.
    pub fn set_trail_length(&mut self, length: usize) {
        settings::set_trail_length(self, length);
    }

    // === Entities ===

    /// Takes ownership of `body`; returns its id. A body whose id is already
    /// in the world is rejected.
    pub fn add_entity(&mut self, body: T) -> Result<EntityId, EngineError> {
        commands::add_entity(self, body)
    }

    /// Removes the body together with its generators, contacts and trail.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<T> {
        commands::remove_entity(self, id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&T> {
        self.bodies.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.bodies.get_mut(id)
    }

    /// Like [`WorldCore::entity_mut`] but an unknown id is an error.
    pub fn try_entity_mut(&mut self, id: EntityId) -> Result<&mut T, EngineError> {
        self.bodies.get_mut(id).ok_or(EngineError::UnknownEntity(id))
    }

    pub fn entities(&self) -> &EntitySet<T> {
        &self.bodies
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.bodies.ids()
    }

    /// Removes every body, registry entry, trail and contact memory.
    /// Triggers and listeners stay.
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    // === Forces ===

    pub fn force_registry(&self) -> &ForceRegistry<T> {
        &self.registry
    }

    pub fn force_registry_mut(&mut self) -> &mut ForceRegistry<T> {
        &mut self.registry
    }

    // === Contacts ===

    pub fn add_trigger(&mut self, trigger: ContactTrigger) -> TriggerId {
        self.contacts.add_trigger(trigger)
    }

    pub fn remove_trigger(&mut self, id: TriggerId) -> Option<ContactTrigger> {
        self.contacts.remove_trigger(id)
    }

    pub fn on_contact<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ContactEvent, &mut T) + 'static,
    {
        self.contacts.on_contact(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.contacts.remove_listener(id)
    }

    pub fn contacts(&self) -> &ContactDispatcher<T> {
        &self.contacts
    }

    /// Contacts raised by the most recent update.
    pub fn last_contacts(&self) -> &[ContactEvent] {
        &self.last_contacts
    }

    // === Trails ===

    pub fn trail(&self, id: EntityId) -> Option<&TrailBuffer> {
        self.trails.get(&id)
    }

    pub fn trail_points(&self, id: EntityId) -> Vec<Vector2> {
        self.trails.get(&id).map(|t| t.iter().collect()).unwrap_or_default()
    }

    // === Simulation ===

    /// Advance the world by `delta_ms` milliseconds.
    pub fn update(&mut self, delta_ms: f64) {
        step::update(self, delta_ms);
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        snapshot::snapshot(self)
    }

    /// Render snapshot as camelCase JSON.
    pub fn snapshot_json(&self) -> String {
        snapshot::snapshot_json(self)
    }
}

impl<T: Body> Default for WorldCore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
