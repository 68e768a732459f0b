use std::collections::BTreeMap;

use crate::core::utils::log;
use crate::domain::config::WorldConfig;
use crate::domain::entity::{Body, EntitySet};
use crate::domain::error::EngineError;
use crate::systems::contact::ContactDispatcher;
use crate::systems::forces::ForceRegistry;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn create_world_core<T: Body>(config: &WorldConfig) -> WorldCore<T> {
    WorldCore {
        bodies: EntitySet::new(),
        registry: ForceRegistry::new(),
        contacts: ContactDispatcher::new(),
        bounds: config.bounds,
        boundary: config.boundary,
        trail_length: config.trail_length,
        trails: BTreeMap::new(),
        last_contacts: Vec::new(),
        frame: 0,
        perf_enabled: config.perf_metrics,
        perf_stats: PerfStats::default(),
    }
}

pub(super) fn create_world_core_from_json<T: Body>(json: &str) -> Result<WorldCore<T>, EngineError> {
    let config = WorldConfig::from_json(json).map_err(|e| {
        log::warn(&format!("world config rejected: {}", e));
        e
    })?;
    log::log(&format!("world config loaded: {}", config.to_json()));
    Ok(create_world_core(&config))
}
