#![cfg(target_arch = "wasm32")]

use kinetica_engine::{ParticleWorld, RigidBodyWorld};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn particle_world_falls_under_gravity() {
    let mut world = ParticleWorld::new();
    let id = world.add_particle(0.0, 10.0, 1.0).unwrap();
    world.set_damping(id, 1.0).unwrap();
    world.add_gravity(id, 0.0, -10.0).unwrap();

    world.update(1000.0);

    let pos = world.position(id).unwrap();
    assert!((pos[1] - 0.0).abs() < 1e-9);
    assert_eq!(world.frame(), 1);
}

#[wasm_bindgen_test]
fn particle_world_rejects_bad_input() {
    let mut world = ParticleWorld::new();
    assert!(world.add_particle(0.0, 0.0, -1.0).is_err());
    assert!(world.add_gravity(42, 0.0, -1.0).is_err());
    assert!(world.set_boundary("teleport", 0.0).is_err());
}

#[wasm_bindgen_test]
fn generator_handles_can_be_tuned_and_removed() {
    let mut world = ParticleWorld::new();
    let id = world.add_particle(0.0, 0.0, 1.0).unwrap();
    let wind = world.add_wind(id, 1.0, 0.0).unwrap();

    world.set_wind(wind, 0.0, 1.0).unwrap();
    assert!(world.set_anchor(wind, 0.0, 0.0).is_err());
    assert!(world.remove_generator(wind));
    assert!(!world.remove_generator(wind));
}

#[wasm_bindgen_test]
fn rigid_world_spins_and_wraps() {
    let mut world = RigidBodyWorld::new();
    let id = world.add_circle(0.0, 0.0, 1.0, 2.0).unwrap();
    world.set_orientation_angle(id, 3.0 * std::f64::consts::FRAC_PI_2).unwrap();
    let angle = world.orientation_angle(id).unwrap();
    assert!((angle + std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    let motor = world.add_constant_torque(id, 1.0).unwrap();
    world.set_torque(motor, 0.0).unwrap();
    assert!(world.add_aero(id, vec![1.0, 0.0], 0.0, 0.0, 0.0, 0.0).is_err());

    world.update(16.0);
    assert!(world.snapshot_json().contains("\"angle\""));
}

#[wasm_bindgen_test]
fn rigid_world_tunes_aero_wind_and_adds_bungees() {
    let mut world = RigidBodyWorld::new();
    let a = world.add_rect(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let b = world.add_rect(5.0, 0.0, 1.0, 1.0, 1.0).unwrap();

    let sail = world.add_aero(a, vec![-1.0, 0.0, 0.0, -1.0], 0.0, 0.0, 0.0, 0.0).unwrap();
    world.set_wind(sail, 2.0, 0.0).unwrap();
    assert!(world.set_control(sail, 0.5).is_err());

    world.add_bungee(a, b, 1.0, 2.0).unwrap();
    world.add_anchored_bungee(b, 10.0, 0.0, 1.0, 2.0).unwrap();
    assert!(world.add_bungee(a, 999, 1.0, 2.0).is_err());
}
