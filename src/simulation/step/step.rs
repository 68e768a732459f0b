use crate::core::utils::log;
use crate::domain::entity::Body;
use crate::systems::boundary::{apply_boundary, BoundaryOutcome};

use super::commands;
use super::perf_timer::elapsed_or_zero;
use super::{PerfTimer, WorldCore};

pub(super) fn update<T: Body>(world: &mut WorldCore<T>, delta_ms: f64) {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let update_start = PerfTimer::start_if(perf_on);

    // === FORCES ===
    // Generators only touch accumulators, never position or velocity
    let t0 = PerfTimer::start_if(perf_on);
    world.registry.apply_forces(&mut world.bodies, delta_ms);
    let forces_ms = elapsed_or_zero(t0);

    // === INTEGRATION ===
    // Accumulators must be empty before the next tick or forces compound
    let t0 = PerfTimer::start_if(perf_on);
    for body in world.bodies.iter_mut() {
        body.integrate(delta_ms);
        body.clear_accumulators();
    }
    let integrate_ms = elapsed_or_zero(t0);

    // === BOUNDARY ACTIONS ===
    let t0 = PerfTimer::start_if(perf_on);
    let removed = apply_boundaries(world);
    let boundary_ms = elapsed_or_zero(t0);

    // === CONTACTS ===
    // Listeners may move bodies; that is what the next tick sees
    let t0 = PerfTimer::start_if(perf_on);
    world.last_contacts = world.contacts.dispatch(&mut world.bodies);
    let contacts_ms = elapsed_or_zero(t0);

    // === TRAILS ===
    let mut samples = 0u32;
    for (id, trail) in world.trails.iter_mut() {
        if let Some(body) = world.bodies.get(*id) {
            trail.push(body.position());
            samples = samples.saturating_add(1);
        }
    }

    if perf_on {
        let stats = &mut world.perf_stats;
        stats.forces_ms = forces_ms;
        stats.integrate_ms = integrate_ms;
        stats.boundary_ms = boundary_ms;
        stats.contacts_ms = contacts_ms;
        stats.entity_count = world.bodies.len() as u32;
        stats.generator_count = world.registry.len() as u32;
        stats.entities_removed = removed;
        stats.contacts_raised = world.last_contacts.len() as u32;
        stats.trail_samples = samples;
        stats.update_ms = elapsed_or_zero(update_start);
    }

    world.frame += 1;
}

/// Applies each body's boundary action; returns how many were despawned.
fn apply_boundaries<T: Body>(world: &mut WorldCore<T>) -> u32 {
    let Some(bounds) = world.bounds else {
        return 0;
    };
    let default_action = world.boundary;

    let mut despawned = Vec::new();
    for body in world.bodies.iter_mut() {
        let action = body.boundary_override().unwrap_or(default_action);
        if apply_boundary(action, body, &bounds) == BoundaryOutcome::Removed {
            despawned.push(body.id());
        }
    }

    for &id in &despawned {
        if world.bodies.remove(id).is_some() {
            commands::forget(world, id);
            log::log(&format!("entity {} left the world", id));
        }
    }
    despawned.len() as u32
}
