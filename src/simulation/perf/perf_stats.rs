use wasm_bindgen::prelude::*;

/// Timings and counters for the last `update` (all zero while perf is off).
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) update_ms: f64,
    pub(super) forces_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) boundary_ms: f64,
    pub(super) contacts_ms: f64,
    pub(super) entity_count: u32,
    pub(super) generator_count: u32,
    pub(super) entities_removed: u32,
    pub(super) contacts_raised: u32,
    pub(super) trail_samples: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn update_ms(&self) -> f64 { self.update_ms }
    #[wasm_bindgen(getter)]
    pub fn forces_ms(&self) -> f64 { self.forces_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn boundary_ms(&self) -> f64 { self.boundary_ms }
    #[wasm_bindgen(getter)]
    pub fn contacts_ms(&self) -> f64 { self.contacts_ms }
    #[wasm_bindgen(getter)]
    pub fn entity_count(&self) -> u32 { self.entity_count }
    #[wasm_bindgen(getter)]
    pub fn generator_count(&self) -> u32 { self.generator_count }
    #[wasm_bindgen(getter)]
    pub fn entities_removed(&self) -> u32 { self.entities_removed }
    #[wasm_bindgen(getter)]
    pub fn contacts_raised(&self) -> u32 { self.contacts_raised }
    #[wasm_bindgen(getter)]
    pub fn trail_samples(&self) -> u32 { self.trail_samples }
}
