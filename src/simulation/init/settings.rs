use crate::core::trail_buffer::TrailBuffer;
use crate::domain::entity::Body;
use crate::systems::boundary::{BoundaryAction, Bounds};

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics<T: Body>(world: &mut WorldCore<T>, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn perf_stats<T: Body>(world: &WorldCore<T>) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_bounds<T: Body>(world: &mut WorldCore<T>, bounds: Option<Bounds>) {
    world.bounds = bounds;
}

pub(super) fn set_boundary_action<T: Body>(world: &mut WorldCore<T>, action: BoundaryAction) {
    world.boundary = action;
}

pub(super) fn set_trail_length<T: Body>(world: &mut WorldCore<T>, length: usize) {
    world.trail_length = length;
    world.trails.clear();
    if length == 0 {
        return;
    }
    for id in world.bodies.ids() {
        if let Ok(trail) = TrailBuffer::new(length) {
            world.trails.insert(id, trail);
        }
    }
}
