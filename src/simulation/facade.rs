use std::collections::BTreeMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::core::math::{Matrix2, Vector2};
use crate::core::utils::log;
use crate::domain::entity::{Body, EntityId};
use crate::domain::error::EngineError;
use crate::systems::boundary::{BoundaryAction, Bounds};
use crate::systems::contact::{ContactTrigger, TriggerId};
use crate::systems::forces::{
    Aero, AeroControl, AnchoredBungee, AnchoredSpring, ConstantTorque, ForceGenerator, ForceGeneratorFactory, Wind,
};
use crate::systems::particle::Particle;
use crate::systems::rigid_body::RigidBody;

use super::perf_stats::PerfStats;
use super::WorldCore;

fn js_err(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Generator state JS may adjust after creation.
enum Tunable {
    Fixed,
    Wind(Rc<Wind>),
    Anchor(Rc<AnchoredSpring>),
    BungeeAnchor(Rc<AnchoredBungee>),
    Aero(Rc<Aero>),
    Control(Rc<AeroControl>),
    Torque(Rc<ConstantTorque>),
}

struct GeneratorHandle<T> {
    generator: Rc<dyn ForceGenerator<T>>,
    tunable: Tunable,
}

/// Everything both wasm worlds share: the core, numeric generator handles
/// handed to JS, and JS contact callbacks.
struct Host<T: Body> {
    core: WorldCore<T>,
    handles: BTreeMap<u32, GeneratorHandle<T>>,
    next_handle: u32,
    contact_callbacks: Vec<js_sys::Function>,
}

impl<T: Body> Host<T> {
    fn new(core: WorldCore<T>) -> Self {
        Self {
            core,
            handles: BTreeMap::new(),
            next_handle: 1,
            contact_callbacks: Vec::new(),
        }
    }

    fn require(&self, id: u32) -> Result<EntityId, JsValue> {
        let id = EntityId(id);
        if self.core.entity(id).is_some() {
            Ok(id)
        } else {
            Err(js_err(EngineError::UnknownEntity(id)))
        }
    }

    fn body_mut(&mut self, id: u32) -> Result<&mut T, JsValue> {
        self.core.try_entity_mut(EntityId(id)).map_err(js_err)
    }

    fn track(&mut self, generator: Rc<dyn ForceGenerator<T>>, tunable: Tunable) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.handles.insert(handle, GeneratorHandle { generator, tunable });
        handle
    }

    fn tunable(&self, handle: u32) -> Result<&Tunable, JsValue> {
        self.handles
            .get(&handle)
            .map(|h| &h.tunable)
            .ok_or_else(|| JsValue::from_str(&format!("unknown generator handle: {}", handle)))
    }

    fn remove_generator(&mut self, handle: u32) -> bool {
        match self.handles.remove(&handle) {
            Some(h) => self.core.force_registry_mut().remove_force_generator(&h.generator) > 0,
            None => false,
        }
    }

    fn set_wind(&self, handle: u32, x: f64, y: f64) -> Result<(), JsValue> {
        match self.tunable(handle)? {
            Tunable::Wind(wind) => wind.set_force(Vector2::new(x, y)),
            _ => return Err(JsValue::from_str("generator has no wind")),
        }
        Ok(())
    }

    fn set_anchor(&self, handle: u32, x: f64, y: f64) -> Result<(), JsValue> {
        let anchor = Vector2::new(x, y);
        match self.tunable(handle)? {
            Tunable::Anchor(spring) => spring.set_anchor(anchor),
            Tunable::BungeeAnchor(bungee) => bungee.set_anchor(anchor),
            _ => return Err(JsValue::from_str("generator has no anchor")),
        }
        Ok(())
    }

    fn add_gravity(&mut self, id: u32, x: f64, y: f64) -> Result<u32, JsValue> {
        let id = self.require(id)?;
        let g = ForceGeneratorFactory::create_gravity(self.core.force_registry_mut(), id, Vector2::new(x, y));
        Ok(self.track(g, Tunable::Fixed))
    }

    fn add_wind(&mut self, id: u32, x: f64, y: f64) -> Result<u32, JsValue> {
        let id = self.require(id)?;
        let g = ForceGeneratorFactory::create_wind(self.core.force_registry_mut(), id, Vector2::new(x, y));
        Ok(self.track(g.clone(), Tunable::Wind(g)))
    }

    fn add_drag(&mut self, id: u32, k1: f64, k2: f64) -> Result<u32, JsValue> {
        let id = self.require(id)?;
        let g = ForceGeneratorFactory::create_drag(self.core.force_registry_mut(), id, k1, k2);
        Ok(self.track(g, Tunable::Fixed))
    }

    fn add_spring(&mut self, id: u32, other: u32, k: f64, rest: f64) -> Result<u32, JsValue> {
        let id = self.require(id)?;
        let other = self.require(other)?;
        let g = ForceGeneratorFactory::create_spring(self.core.force_registry_mut(), id, other, k, rest);
        Ok(self.track(g, Tunable::Fixed))
    }

    fn add_anchored_spring(&mut self, id: u32, ax: f64, ay: f64, k: f64, rest: f64) -> Result<u32, JsValue> {
        let id = self.require(id)?;
        let anchor = Vector2::new(ax, ay);
        let g = ForceGeneratorFactory::create_anchored_spring(self.core.force_registry_mut(), id, anchor, k, rest);
        Ok(self.track(g.clone(), Tunable::Anchor(g)))
    }

    fn add_bungee(&mut self, id: u32, other: u32, k: f64, rest: f64) -> Result<u32, JsValue> {
        let id = self.require(id)?;
        let other = self.require(other)?;
        let g = ForceGeneratorFactory::create_bungee(self.core.force_registry_mut(), id, other, k, rest);
        Ok(self.track(g, Tunable::Fixed))
    }

    fn add_anchored_bungee(&mut self, id: u32, ax: f64, ay: f64, k: f64, rest: f64) -> Result<u32, JsValue> {
        let id = self.require(id)?;
        let anchor = Vector2::new(ax, ay);
        let g = ForceGeneratorFactory::create_anchored_bungee(self.core.force_registry_mut(), id, anchor, k, rest);
        Ok(self.track(g.clone(), Tunable::BungeeAnchor(g)))
    }

    fn add_buoyancy(
        &mut self,
        id: u32,
        max_depth: f64,
        volume: f64,
        water_height: f64,
        liquid_density: f64,
    ) -> Result<u32, JsValue> {
        let id = self.require(id)?;
        let g = ForceGeneratorFactory::create_buoyancy(
            self.core.force_registry_mut(),
            id,
            max_depth,
            volume,
            water_height,
            liquid_density,
        );
        Ok(self.track(g, Tunable::Fixed))
    }

    fn add_plane_trigger(&mut self, px: f64, py: f64, nx: f64, ny: f64) -> Result<u32, JsValue> {
        let trigger = ContactTrigger::plane(Vector2::new(px, py), Vector2::new(nx, ny)).map_err(js_err)?;
        Ok(self.core.add_trigger(trigger).0)
    }

    fn add_circle_trigger(&mut self, cx: f64, cy: f64, radius: f64) -> Result<u32, JsValue> {
        let trigger = ContactTrigger::circle(Vector2::new(cx, cy), radius).map_err(js_err)?;
        Ok(self.core.add_trigger(trigger).0)
    }

    fn set_bounds(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<(), JsValue> {
        let bounds = Bounds::new(Vector2::new(min_x, min_y), Vector2::new(max_x, max_y)).map_err(js_err)?;
        self.core.set_bounds(Some(bounds));
        Ok(())
    }

    fn set_boundary(&mut self, kind: &str, restitution: f64) -> Result<(), JsValue> {
        let action = BoundaryAction::from_name(kind, restitution).map_err(js_err)?;
        self.core.set_boundary_action(action);
        Ok(())
    }

    fn remove_entity(&mut self, id: u32) -> bool {
        let removed = self.core.remove_entity(EntityId(id)).is_some();
        if removed {
            self.prune_handles();
        }
        removed
    }

    /// Forgets handles whose generator is no longer registered anywhere.
    fn prune_handles(&mut self) {
        let registry = self.core.force_registry();
        let live: Vec<_> = self
            .core
            .ids()
            .into_iter()
            .flat_map(|id| registry.force_generators(id))
            .map(|g| Rc::as_ptr(&g).cast::<()>())
            .collect();
        self.handles
            .retain(|_, h| live.contains(&Rc::as_ptr(&h.generator).cast::<()>()));
    }

    fn clear(&mut self) {
        self.core.clear();
        self.handles.clear();
    }

    /// Runs one tick, then hands new contacts to JS. Callbacks run after the
    /// world has finished updating, so they observe post-tick state.
    fn update(&mut self, delta_ms: f64) -> u32 {
        let before = self.core.len();
        self.core.update(delta_ms);
        if self.core.len() < before {
            self.prune_handles();
        }

        let contacts = self.core.last_contacts();
        if !self.contact_callbacks.is_empty() {
            for event in contacts {
                for callback in &self.contact_callbacks {
                    let result = callback.call3(
                        &JsValue::NULL,
                        &JsValue::from(event.entity.0),
                        &JsValue::from(event.trigger.0),
                        &JsValue::from(event.penetration),
                    );
                    if result.is_err() {
                        log::warn(&format!("contact callback failed for entity {}", event.entity));
                    }
                }
            }
        }
        contacts.len() as u32
    }

    fn contacts_json(&self) -> String {
        serde_json::to_string(self.core.last_contacts()).unwrap_or_else(|_| "[]".to_string())
    }

    fn trail(&self, id: u32) -> Vec<f64> {
        self.core
            .trail_points(EntityId(id))
            .into_iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }
}

/// Particle world exposed to JS
#[wasm_bindgen]
pub struct ParticleWorld {
    host: Host<Particle>,
}

#[wasm_bindgen]
impl ParticleWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            host: Host::new(WorldCore::new()),
        }
    }

    /// Build from a JSON world config (bounds, boundary, trails, perf)
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<ParticleWorld, JsValue> {
        let core = WorldCore::from_config_json(json).map_err(js_err)?;
        Ok(Self { host: Host::new(core) })
    }

    pub fn frame(&self) -> u64 { self.host.core.frame() }

    pub fn entity_count(&self) -> usize { self.host.core.len() }

    /// Enable or disable per-update perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.host.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.host.core.perf_stats()
    }

    // === ENTITIES ===

    /// Returns the new particle's id
    pub fn add_particle(&mut self, x: f64, y: f64, mass: f64) -> Result<u32, JsValue> {
        let particle = Particle::new(Vector2::new(x, y)).with_mass(mass).map_err(js_err)?;
        Ok(self.host.core.add_entity(particle).map_err(js_err)?.0)
    }

    /// Immovable particle (anchor point for springs)
    pub fn add_fixed_particle(&mut self, x: f64, y: f64) -> Result<u32, JsValue> {
        let particle = Particle::fixed(Vector2::new(x, y));
        Ok(self.host.core.add_entity(particle).map_err(js_err)?.0)
    }

    pub fn remove_entity(&mut self, id: u32) -> bool {
        self.host.remove_entity(id)
    }

    pub fn clear(&mut self) {
        self.host.clear();
    }

    pub fn set_damping(&mut self, id: u32, damping: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.set_damping(damping);
        Ok(())
    }

    pub fn set_radius(&mut self, id: u32, radius: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.radius = radius.max(0.0);
        Ok(())
    }

    pub fn set_mass(&mut self, id: u32, mass: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.set_mass(mass).map_err(js_err)
    }

    /// `[x, y]`
    pub fn position(&self, id: u32) -> Option<Vec<f64>> {
        self.host.core.entity(EntityId(id)).map(|p| vec![p.pos.x, p.pos.y])
    }

    /// `[vx, vy]`
    pub fn velocity(&self, id: u32) -> Option<Vec<f64>> {
        self.host.core.entity(EntityId(id)).map(|p| vec![p.vel.x, p.vel.y])
    }

    pub fn set_position(&mut self, id: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.pos = Vector2::new(x, y);
        Ok(())
    }

    pub fn set_velocity(&mut self, id: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.vel = Vector2::new(x, y);
        Ok(())
    }

    // === FORCE GENERATORS (return a handle) ===

    pub fn add_gravity(&mut self, id: u32, x: f64, y: f64) -> Result<u32, JsValue> {
        self.host.add_gravity(id, x, y)
    }

    pub fn add_wind(&mut self, id: u32, x: f64, y: f64) -> Result<u32, JsValue> {
        self.host.add_wind(id, x, y)
    }

    pub fn add_drag(&mut self, id: u32, k1: f64, k2: f64) -> Result<u32, JsValue> {
        self.host.add_drag(id, k1, k2)
    }

    pub fn add_spring(&mut self, id: u32, other: u32, k: f64, rest_length: f64) -> Result<u32, JsValue> {
        self.host.add_spring(id, other, k, rest_length)
    }

    pub fn add_anchored_spring(&mut self, id: u32, ax: f64, ay: f64, k: f64, rest_length: f64) -> Result<u32, JsValue> {
        self.host.add_anchored_spring(id, ax, ay, k, rest_length)
    }

    pub fn add_bungee(&mut self, id: u32, other: u32, k: f64, rest_length: f64) -> Result<u32, JsValue> {
        self.host.add_bungee(id, other, k, rest_length)
    }

    pub fn add_anchored_bungee(&mut self, id: u32, ax: f64, ay: f64, k: f64, rest_length: f64) -> Result<u32, JsValue> {
        self.host.add_anchored_bungee(id, ax, ay, k, rest_length)
    }

    pub fn add_buoyancy(
        &mut self,
        id: u32,
        max_depth: f64,
        volume: f64,
        water_height: f64,
        liquid_density: f64,
    ) -> Result<u32, JsValue> {
        self.host.add_buoyancy(id, max_depth, volume, water_height, liquid_density)
    }

    pub fn set_wind(&mut self, handle: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.host.set_wind(handle, x, y)
    }

    pub fn set_anchor(&mut self, handle: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.host.set_anchor(handle, x, y)
    }

    /// Unregisters the generator from every body it was attached to
    pub fn remove_generator(&mut self, handle: u32) -> bool {
        self.host.remove_generator(handle)
    }

    // === BOUNDARY & CONTACTS ===

    pub fn set_bounds(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<(), JsValue> {
        self.host.set_bounds(min_x, min_y, max_x, max_y)
    }

    pub fn clear_bounds(&mut self) {
        self.host.core.set_bounds(None);
    }

    /// `kind` is one of none | bounce | wrap | die
    pub fn set_boundary(&mut self, kind: &str, restitution: f64) -> Result<(), JsValue> {
        self.host.set_boundary(kind, restitution)
    }

    pub fn add_plane_trigger(&mut self, px: f64, py: f64, nx: f64, ny: f64) -> Result<u32, JsValue> {
        self.host.add_plane_trigger(px, py, nx, ny)
    }

    pub fn add_circle_trigger(&mut self, cx: f64, cy: f64, radius: f64) -> Result<u32, JsValue> {
        self.host.add_circle_trigger(cx, cy, radius)
    }

    pub fn remove_trigger(&mut self, id: u32) -> bool {
        self.host.core.remove_trigger(TriggerId(id)).is_some()
    }

    /// `callback(entityId, triggerId, penetration)` for every new contact
    pub fn on_contact(&mut self, callback: js_sys::Function) {
        self.host.contact_callbacks.push(callback);
    }

    // === SIMULATION ===

    /// Advance by `delta_ms`; returns the number of contacts raised
    pub fn update(&mut self, delta_ms: f64) -> u32 {
        self.host.update(delta_ms)
    }

    pub fn snapshot_json(&self) -> String {
        self.host.core.snapshot_json()
    }

    pub fn contacts_json(&self) -> String {
        self.host.contacts_json()
    }

    pub fn set_trail_length(&mut self, length: usize) {
        self.host.core.set_trail_length(length);
    }

    /// Flat `[x0, y0, x1, y1, ...]`, oldest first
    pub fn trail(&self, id: u32) -> Vec<f64> {
        self.host.trail(id)
    }
}

impl Default for ParticleWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn matrix_from_slice(name: &'static str, e: &[f64]) -> Result<Matrix2, JsValue> {
    match e {
        [e0, e1, e2, e3] => Ok(Matrix2::new(*e0, *e1, *e2, *e3)),
        _ => Err(js_err(EngineError::invalid(
            name,
            format!("expected 4 row-major entries, got {}", e.len()),
        ))),
    }
}

/// Rigid body world exposed to JS
#[wasm_bindgen]
pub struct RigidBodyWorld {
    host: Host<RigidBody>,
}

#[wasm_bindgen]
impl RigidBodyWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            host: Host::new(WorldCore::new()),
        }
    }

    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<RigidBodyWorld, JsValue> {
        let core = WorldCore::from_config_json(json).map_err(js_err)?;
        Ok(Self { host: Host::new(core) })
    }

    pub fn frame(&self) -> u64 { self.host.core.frame() }

    pub fn entity_count(&self) -> usize { self.host.core.len() }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.host.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.host.core.perf_stats()
    }

    // === BODIES ===

    /// Solid rectangle; returns the body id
    pub fn add_rect(&mut self, x: f64, y: f64, width: f64, height: f64, mass: f64) -> Result<u32, JsValue> {
        let body = RigidBody::new_rect(Vector2::new(x, y), width, height, mass).map_err(js_err)?;
        Ok(self.host.core.add_entity(body).map_err(js_err)?.0)
    }

    /// Solid disc; returns the body id
    pub fn add_circle(&mut self, x: f64, y: f64, radius: f64, mass: f64) -> Result<u32, JsValue> {
        let body = RigidBody::new_circle(Vector2::new(x, y), radius, mass).map_err(js_err)?;
        Ok(self.host.core.add_entity(body).map_err(js_err)?.0)
    }

    pub fn remove_entity(&mut self, id: u32) -> bool {
        self.host.remove_entity(id)
    }

    pub fn clear(&mut self) {
        self.host.clear();
    }

    pub fn position(&self, id: u32) -> Option<Vec<f64>> {
        self.host.core.entity(EntityId(id)).map(|b| vec![b.pos.x, b.pos.y])
    }

    pub fn velocity(&self, id: u32) -> Option<Vec<f64>> {
        self.host.core.entity(EntityId(id)).map(|b| vec![b.vel.x, b.vel.y])
    }

    /// Radians in (-PI, PI]
    pub fn orientation_angle(&self, id: u32) -> Option<f64> {
        self.host.core.entity(EntityId(id)).map(RigidBody::orientation_angle)
    }

    /// Heading unit vector `[x, y]`
    pub fn orientation(&self, id: u32) -> Option<Vec<f64>> {
        self.host.core.entity(EntityId(id)).map(|b| {
            let h = b.orientation();
            vec![h.x, h.y]
        })
    }

    pub fn angular_velocity(&self, id: u32) -> Option<f64> {
        self.host.core.entity(EntityId(id)).map(|b| b.angular_velocity)
    }

    /// Body-space point to world space, `[x, y]`
    pub fn point_in_world_space(&self, id: u32, lx: f64, ly: f64) -> Option<Vec<f64>> {
        self.host.core.entity(EntityId(id)).map(|b| {
            let p = b.point_in_world_space(Vector2::new(lx, ly));
            vec![p.x, p.y]
        })
    }

    pub fn set_position(&mut self, id: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.pos = Vector2::new(x, y);
        Ok(())
    }

    pub fn set_velocity(&mut self, id: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.vel = Vector2::new(x, y);
        Ok(())
    }

    /// Angle is wrapped and the rotation matrix refreshed immediately
    pub fn set_orientation_angle(&mut self, id: u32, angle: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.set_orientation_angle(angle);
        Ok(())
    }

    pub fn set_angular_velocity(&mut self, id: u32, omega: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.angular_velocity = omega;
        Ok(())
    }

    pub fn set_damping(&mut self, id: u32, linear: f64, angular: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.set_damping(linear, angular);
        Ok(())
    }

    pub fn apply_impulse(&mut self, id: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.host.body_mut(id)?.apply_impulse(Vector2::new(x, y));
        Ok(())
    }

    // === FORCE GENERATORS (return a handle) ===

    pub fn add_gravity(&mut self, id: u32, x: f64, y: f64) -> Result<u32, JsValue> {
        self.host.add_gravity(id, x, y)
    }

    pub fn add_wind(&mut self, id: u32, x: f64, y: f64) -> Result<u32, JsValue> {
        self.host.add_wind(id, x, y)
    }

    pub fn add_drag(&mut self, id: u32, k1: f64, k2: f64) -> Result<u32, JsValue> {
        self.host.add_drag(id, k1, k2)
    }

    pub fn add_spring(&mut self, id: u32, other: u32, k: f64, rest_length: f64) -> Result<u32, JsValue> {
        self.host.add_spring(id, other, k, rest_length)
    }

    pub fn add_anchored_spring(&mut self, id: u32, ax: f64, ay: f64, k: f64, rest_length: f64) -> Result<u32, JsValue> {
        self.host.add_anchored_spring(id, ax, ay, k, rest_length)
    }

    pub fn add_bungee(&mut self, id: u32, other: u32, k: f64, rest_length: f64) -> Result<u32, JsValue> {
        self.host.add_bungee(id, other, k, rest_length)
    }

    pub fn add_anchored_bungee(&mut self, id: u32, ax: f64, ay: f64, k: f64, rest_length: f64) -> Result<u32, JsValue> {
        self.host.add_anchored_bungee(id, ax, ay, k, rest_length)
    }

    pub fn add_buoyancy(
        &mut self,
        id: u32,
        max_depth: f64,
        volume: f64,
        water_height: f64,
        liquid_density: f64,
    ) -> Result<u32, JsValue> {
        self.host.add_buoyancy(id, max_depth, volume, water_height, liquid_density)
    }

    /// `tensor` is 4 row-major entries; `(px, py)` is body-space
    pub fn add_aero(
        &mut self,
        id: u32,
        tensor: Vec<f64>,
        px: f64,
        py: f64,
        wind_x: f64,
        wind_y: f64,
    ) -> Result<u32, JsValue> {
        let id = self.host.require(id)?;
        let tensor = matrix_from_slice("aero tensor", &tensor)?;
        let g = ForceGeneratorFactory::create_aero(
            self.host.core.force_registry_mut(),
            id,
            tensor,
            Vector2::new(px, py),
            Vector2::new(wind_x, wind_y),
        );
        Ok(self.host.track(g.clone(), Tunable::Aero(g)))
    }

    /// Control surface blending `min`/`base`/`max` tensors by a [-1, 1] setting
    #[allow(clippy::too_many_arguments)]
    pub fn add_aero_control(
        &mut self,
        id: u32,
        base: Vec<f64>,
        min: Vec<f64>,
        max: Vec<f64>,
        px: f64,
        py: f64,
        wind_x: f64,
        wind_y: f64,
    ) -> Result<u32, JsValue> {
        let id = self.host.require(id)?;
        let base = matrix_from_slice("base tensor", &base)?;
        let min = matrix_from_slice("min tensor", &min)?;
        let max = matrix_from_slice("max tensor", &max)?;
        let g = ForceGeneratorFactory::create_aero_control(
            self.host.core.force_registry_mut(),
            id,
            base,
            min,
            max,
            Vector2::new(px, py),
            Vector2::new(wind_x, wind_y),
        );
        Ok(self.host.track(g.clone(), Tunable::Control(g)))
    }

    pub fn add_constant_torque(&mut self, id: u32, torque: f64) -> Result<u32, JsValue> {
        let id = self.host.require(id)?;
        let g = ForceGeneratorFactory::create_constant_torque(self.host.core.force_registry_mut(), id, torque);
        Ok(self.host.track(g.clone(), Tunable::Torque(g)))
    }

    /// Spring between body-space points on two bodies
    #[allow(clippy::too_many_arguments)]
    pub fn add_body_spring(
        &mut self,
        id: u32,
        lx: f64,
        ly: f64,
        other: u32,
        ox: f64,
        oy: f64,
        k: f64,
        rest_length: f64,
    ) -> Result<u32, JsValue> {
        let id = self.host.require(id)?;
        let other = self.host.require(other)?;
        let g = ForceGeneratorFactory::create_body_spring(
            self.host.core.force_registry_mut(),
            id,
            Vector2::new(lx, ly),
            other,
            Vector2::new(ox, oy),
            k,
            rest_length,
        );
        Ok(self.host.track(g, Tunable::Fixed))
    }

    pub fn set_wind(&mut self, handle: u32, x: f64, y: f64) -> Result<(), JsValue> {
        match self.host.tunable(handle)? {
            Tunable::Aero(aero) => aero.set_wind(Vector2::new(x, y)),
            Tunable::Control(aero) => aero.set_wind(Vector2::new(x, y)),
            _ => return self.host.set_wind(handle, x, y),
        }
        Ok(())
    }

    pub fn set_anchor(&mut self, handle: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.host.set_anchor(handle, x, y)
    }

    /// Clamped into [-1, 1]
    pub fn set_control(&mut self, handle: u32, value: f64) -> Result<(), JsValue> {
        match self.host.tunable(handle)? {
            Tunable::Control(aero) => aero.set_control(value),
            _ => return Err(JsValue::from_str("generator is not a control surface")),
        }
        Ok(())
    }

    pub fn set_torque(&mut self, handle: u32, torque: f64) -> Result<(), JsValue> {
        match self.host.tunable(handle)? {
            Tunable::Torque(motor) => motor.set_torque(torque),
            _ => return Err(JsValue::from_str("generator is not a torque")),
        }
        Ok(())
    }

    pub fn remove_generator(&mut self, handle: u32) -> bool {
        self.host.remove_generator(handle)
    }

    // === BOUNDARY & CONTACTS ===

    pub fn set_bounds(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<(), JsValue> {
        self.host.set_bounds(min_x, min_y, max_x, max_y)
    }

    pub fn clear_bounds(&mut self) {
        self.host.core.set_bounds(None);
    }

    pub fn set_boundary(&mut self, kind: &str, restitution: f64) -> Result<(), JsValue> {
        self.host.set_boundary(kind, restitution)
    }

    pub fn add_plane_trigger(&mut self, px: f64, py: f64, nx: f64, ny: f64) -> Result<u32, JsValue> {
        self.host.add_plane_trigger(px, py, nx, ny)
    }

    pub fn add_circle_trigger(&mut self, cx: f64, cy: f64, radius: f64) -> Result<u32, JsValue> {
        self.host.add_circle_trigger(cx, cy, radius)
    }

    pub fn remove_trigger(&mut self, id: u32) -> bool {
        self.host.core.remove_trigger(TriggerId(id)).is_some()
    }

    pub fn on_contact(&mut self, callback: js_sys::Function) {
        self.host.contact_callbacks.push(callback);
    }

    // === SIMULATION ===

    pub fn update(&mut self, delta_ms: f64) -> u32 {
        self.host.update(delta_ms)
    }

    pub fn snapshot_json(&self) -> String {
        self.host.core.snapshot_json()
    }

    pub fn contacts_json(&self) -> String {
        self.host.contacts_json()
    }

    pub fn set_trail_length(&mut self, length: usize) {
        self.host.core.set_trail_length(length);
    }

    pub fn trail(&self, id: u32) -> Vec<f64> {
        self.host.trail(id)
    }
}

impl Default for RigidBodyWorld {
    fn default() -> Self {
        Self::new()
    }
}
