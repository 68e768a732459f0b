use std::rc::Rc;

use super::{
    Aero, AeroControl, AnchoredBungee, AnchoredSpring, BodySpring, Buoyancy, Bungee, ConstantTorque, Drag,
    ForceRegistry, Gravity, Spring, Wind,
};
use crate::core::math::{Matrix2, Vector2};
use crate::domain::entity::{Body, EntityId};
use crate::systems::rigid_body::RigidBody;

/// Builds the standard generators and registers them in one call.
///
/// Each `create_*` returns the registered instance so the caller can tune
/// it later or pass it to [`ForceRegistry::remove_force_generator`].
pub struct ForceGeneratorFactory;

impl ForceGeneratorFactory {
    pub fn create_gravity<T: Body>(registry: &mut ForceRegistry<T>, target: EntityId, gravity: Vector2) -> Rc<Gravity> {
        let generator = Rc::new(Gravity::new(gravity));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_wind<T: Body>(registry: &mut ForceRegistry<T>, target: EntityId, force: Vector2) -> Rc<Wind> {
        let generator = Rc::new(Wind::new(force));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_drag<T: Body>(registry: &mut ForceRegistry<T>, target: EntityId, k1: f64, k2: f64) -> Rc<Drag> {
        let generator = Rc::new(Drag::new(k1, k2));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_spring<T: Body>(
        registry: &mut ForceRegistry<T>,
        target: EntityId,
        other: EntityId,
        spring_constant: f64,
        rest_length: f64,
    ) -> Rc<Spring> {
        let generator = Rc::new(Spring::new(other, spring_constant, rest_length));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_anchored_spring<T: Body>(
        registry: &mut ForceRegistry<T>,
        target: EntityId,
        anchor: Vector2,
        spring_constant: f64,
        rest_length: f64,
    ) -> Rc<AnchoredSpring> {
        let generator = Rc::new(AnchoredSpring::new(anchor, spring_constant, rest_length));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_bungee<T: Body>(
        registry: &mut ForceRegistry<T>,
        target: EntityId,
        other: EntityId,
        spring_constant: f64,
        rest_length: f64,
    ) -> Rc<Bungee> {
        let generator = Rc::new(Bungee::new(other, spring_constant, rest_length));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_anchored_bungee<T: Body>(
        registry: &mut ForceRegistry<T>,
        target: EntityId,
        anchor: Vector2,
        spring_constant: f64,
        rest_length: f64,
    ) -> Rc<AnchoredBungee> {
        let generator = Rc::new(AnchoredBungee::new(anchor, spring_constant, rest_length));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_buoyancy<T: Body>(
        registry: &mut ForceRegistry<T>,
        target: EntityId,
        max_depth: f64,
        volume: f64,
        water_height: f64,
        liquid_density: f64,
    ) -> Rc<Buoyancy> {
        let generator = Rc::new(Buoyancy::new(max_depth, volume, water_height, liquid_density));
        registry.add(target, generator.clone());
        generator
    }

    // === Rigid body only ===

    pub fn create_aero(
        registry: &mut ForceRegistry<RigidBody>,
        target: EntityId,
        tensor: Matrix2,
        position: Vector2,
        wind: Vector2,
    ) -> Rc<Aero> {
        let generator = Rc::new(Aero::new(tensor, position, wind));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_aero_control(
        registry: &mut ForceRegistry<RigidBody>,
        target: EntityId,
        base: Matrix2,
        min: Matrix2,
        max: Matrix2,
        position: Vector2,
        wind: Vector2,
    ) -> Rc<AeroControl> {
        let generator = Rc::new(AeroControl::new(base, min, max, position, wind));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_constant_torque(
        registry: &mut ForceRegistry<RigidBody>,
        target: EntityId,
        torque: f64,
    ) -> Rc<ConstantTorque> {
        let generator = Rc::new(ConstantTorque::new(torque));
        registry.add(target, generator.clone());
        generator
    }

    pub fn create_body_spring(
        registry: &mut ForceRegistry<RigidBody>,
        target: EntityId,
        connection_point: Vector2,
        other: EntityId,
        other_connection_point: Vector2,
        spring_constant: f64,
        rest_length: f64,
    ) -> Rc<BodySpring> {
        let generator = Rc::new(BodySpring::new(
            connection_point,
            other,
            other_connection_point,
            spring_constant,
            rest_length,
        ));
        registry.add(target, generator.clone());
        generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::particle::Particle;

    #[test]
    fn created_generators_are_registered() {
        let mut registry = ForceRegistry::<Particle>::new();
        let target = Particle::new(Vector2::ZERO).id();

        let wind = ForceGeneratorFactory::create_wind(&mut registry, target, Vector2::X);
        ForceGeneratorFactory::create_drag(&mut registry, target, 0.1, 0.01);
        ForceGeneratorFactory::create_anchored_bungee(&mut registry, target, Vector2::ZERO, 1.0, 2.0);

        assert_eq!(
            registry.generator_names(target),
            vec!["wind", "drag", "anchored bungee"]
        );

        // Returned handle is the registered instance
        assert_eq!(registry.remove_force_generator(&wind), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn rigid_only_generators_register() {
        let mut registry = ForceRegistry::<RigidBody>::new();
        let target = RigidBody::new(Vector2::ZERO).id();
        let control = ForceGeneratorFactory::create_aero_control(
            &mut registry,
            target,
            Matrix2::IDENTITY,
            Matrix2::ZERO,
            Matrix2::IDENTITY,
            Vector2::ZERO,
            Vector2::ZERO,
        );
        ForceGeneratorFactory::create_constant_torque(&mut registry, target, 1.0);
        ForceGeneratorFactory::create_gravity(&mut registry, target, Vector2::new(0.0, -9.81));

        control.set_control(0.25);
        assert_eq!(registry.force_generators(target).len(), 3);
    }
}
