use std::rc::Rc;

use super::{ForceContext, ForceGenerator};
use crate::domain::entity::{Body, EntityId, EntitySet};

struct Registration<T> {
    target: EntityId,
    generator: Rc<dyn ForceGenerator<T>>,
}

/// Many-to-many map from bodies to the generators acting on them.
///
/// Entries are kept in one flat list in insertion order, so each target's
/// generators run in the order they were registered. Nothing is deduplicated.
pub struct ForceRegistry<T> {
    entries: Vec<Registration<T>>,
}

impl<T: Body> ForceRegistry<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add(&mut self, target: EntityId, generator: Rc<dyn ForceGenerator<T>>) {
        self.entries.push(Registration { target, generator });
    }

    /// Generators registered for `target`, oldest first. Empty if none.
    pub fn force_generators(&self, target: EntityId) -> Vec<Rc<dyn ForceGenerator<T>>> {
        self.entries
            .iter()
            .filter(|e| e.target == target)
            .map(|e| Rc::clone(&e.generator))
            .collect()
    }

    /// Generator labels for `target`, oldest first.
    pub fn generator_names(&self, target: EntityId) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| e.target == target)
            .map(|e| e.generator.name())
            .collect()
    }

    /// Drops every entry for `target`. Returns how many were removed.
    pub fn remove_force_generators(&mut self, target: EntityId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.target != target);
        before - self.entries.len()
    }

    /// Drops every entry whose generator reads `id` as its other end
    /// (springs, bungees). Returns how many were removed.
    pub fn remove_references_to(&mut self, id: EntityId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.generator.references(id));
        before - self.entries.len()
    }

    /// Drops every entry referencing this generator instance, whatever the
    /// target. Identity is the `Rc` allocation, not value equality.
    pub fn remove_force_generator<G: ?Sized>(&mut self, generator: &Rc<G>) -> usize {
        let ptr = Rc::as_ptr(generator).cast::<()>();
        let before = self.entries.len();
        self.entries
            .retain(|e| Rc::as_ptr(&e.generator).cast::<()>() != ptr);
        before - self.entries.len()
    }

    /// Runs every entry once, in insertion order. Entries whose target is no
    /// longer in `bodies` are skipped.
    pub fn apply_forces(&self, bodies: &mut EntitySet<T>, delta_ms: f64) {
        for entry in &self.entries {
            if !bodies.contains(entry.target) {
                continue;
            }
            let mut ctx = ForceContext {
                target: entry.target,
                bodies: &mut *bodies,
                delta_ms,
            };
            entry.generator.apply_force(&mut ctx);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Body> Default for ForceRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vector2;
    use crate::systems::forces::test_support::particles;
    use crate::systems::forces::{Bungee, Gravity, Spring, Wind};
    use crate::systems::particle::Particle;
    use std::cell::RefCell;

    /// Records the target's accumulator when it runs.
    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<(&'static str, Vector2)>>>,
    }

    impl ForceGenerator<Particle> for Recorder {
        fn apply_force(&self, ctx: &mut ForceContext<'_, Particle>) {
            if let Some(p) = ctx.target_mut() {
                p.apply_force(Vector2::new(1.0, 0.0));
                self.log.borrow_mut().push((self.label, p.force_accum()));
            }
        }

        fn name(&self) -> &'static str {
            self.label
        }
    }

    #[test]
    fn removing_one_target_leaves_others_intact() {
        let (_, ids) = particles(&[Vector2::ZERO, Vector2::ZERO]);
        let (a, b) = (ids[0], ids[1]);
        let mut registry = ForceRegistry::<Particle>::new();
        let gravity = Rc::new(Gravity::new(Vector2::new(0.0, -9.81)));

        registry.add(a, gravity.clone());
        registry.add(a, Rc::new(Wind::new(Vector2::X)));
        registry.add(b, gravity.clone());

        assert_eq!(registry.remove_force_generators(a), 2);
        assert!(registry.force_generators(a).is_empty());
        assert_eq!(registry.force_generators(b).len(), 1);
        assert_eq!(registry.generator_names(b), vec!["gravity"]);
    }

    #[test]
    fn removing_a_generator_spans_all_targets() {
        let (_, ids) = particles(&[Vector2::ZERO, Vector2::ZERO]);
        let mut registry = ForceRegistry::<Particle>::new();
        let gravity = Rc::new(Gravity::new(Vector2::new(0.0, -1.0)));
        let other = Rc::new(Gravity::new(Vector2::new(0.0, -1.0)));

        registry.add(ids[0], gravity.clone());
        registry.add(ids[1], gravity.clone());
        registry.add(ids[1], other.clone());

        // Equal value, different instance: untouched
        assert_eq!(registry.remove_force_generator(&gravity), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.force_generators(ids[1]).len(), 1);
    }

    #[test]
    fn removing_a_body_drops_springs_pointing_at_it() {
        let (_, ids) = particles(&[Vector2::ZERO, Vector2::X, Vector2::Y]);
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        let mut registry = ForceRegistry::<Particle>::new();
        registry.add(a, Rc::new(Spring::new(b, 1.0, 1.0)));
        registry.add(c, Rc::new(Bungee::new(b, 1.0, 1.0)));
        registry.add(a, Rc::new(Spring::new(c, 1.0, 1.0)));
        registry.add(a, Rc::new(Gravity::new(Vector2::new(0.0, -1.0))));

        assert_eq!(registry.remove_references_to(b), 2);
        assert_eq!(registry.generator_names(a), vec!["spring", "gravity"]);
        assert!(registry.force_generators(c).is_empty());
    }

    #[test]
    fn generators_run_in_registration_order() {
        let (mut bodies, ids) = particles(&[Vector2::ZERO, Vector2::ZERO]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ForceRegistry::<Particle>::new();
        for (target, label) in [(ids[0], "first"), (ids[1], "other"), (ids[0], "second")] {
            registry.add(target, Rc::new(Recorder { label, log: log.clone() }));
        }

        registry.apply_forces(&mut bodies, 16.0);

        let seen = log.borrow();
        assert_eq!(seen[0], ("first", Vector2::new(1.0, 0.0)));
        assert_eq!(seen[1], ("other", Vector2::new(1.0, 0.0)));
        assert_eq!(seen[2], ("second", Vector2::new(2.0, 0.0)));
    }

    #[test]
    fn missing_targets_are_skipped() {
        let (mut bodies, ids) = particles(&[Vector2::ZERO, Vector2::ZERO]);
        let mut registry = ForceRegistry::<Particle>::new();
        let wind = Rc::new(Wind::new(Vector2::new(2.0, 0.0)));
        registry.add(ids[0], wind.clone());
        registry.add(ids[1], wind);

        bodies.remove(ids[0]);
        registry.apply_forces(&mut bodies, 16.0);

        assert_eq!(bodies.get(ids[1]).unwrap().force_accum(), Vector2::new(2.0, 0.0));
        assert_eq!(registry.len(), 2);
        registry.clear();
        assert!(registry.is_empty());
    }
}
