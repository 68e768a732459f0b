use super::{ForceContext, ForceGenerator};
use crate::core::math::Vector2;
use crate::domain::entity::Body;

/// Upward force from a liquid whose surface is the line `y = water_height`.
///
/// A body is treated as a column of height `2 * max_depth` centred on its
/// position:
///
/// - `y >= water_height + max_depth`: out of the liquid, no force
/// - `y <= water_height - max_depth`: fully submerged, `density * volume`
/// - in between: linear in the submerged fraction
///
/// The interpolation reaches exactly 0 and 1 at the two thresholds, so the
/// force is continuous across both.
#[derive(Clone, Debug)]
pub struct Buoyancy {
    max_depth: f64,
    volume: f64,
    water_height: f64,
    liquid_density: f64,
}

impl Buoyancy {
    /// Water has density 1000 kg/m³.
    pub const WATER_DENSITY: f64 = 1000.0;

    pub fn new(max_depth: f64, volume: f64, water_height: f64, liquid_density: f64) -> Self {
        Self {
            max_depth,
            volume,
            water_height,
            liquid_density,
        }
    }

    /// Submerged fraction in [0, 1] for a body centred at height `y`.
    pub fn submerged_fraction(&self, y: f64) -> f64 {
        let top = self.water_height + self.max_depth;
        let bottom = self.water_height - self.max_depth;
        if y >= top {
            0.0
        } else if y <= bottom {
            1.0
        } else {
            (top - y) / (2.0 * self.max_depth)
        }
    }

    /// Upward force on a body centred at height `y`.
    pub fn force_at(&self, y: f64) -> Vector2 {
        Vector2::new(0.0, self.liquid_density * self.volume * self.submerged_fraction(y))
    }
}

impl<T: Body> ForceGenerator<T> for Buoyancy {
    fn apply_force(&self, ctx: &mut ForceContext<'_, T>) {
        let Some(body) = ctx.target_mut() else { return };
        let force = self.force_at(body.position().y);
        if !force.is_zero() {
            body.apply_force(force);
        }
    }

    fn name(&self) -> &'static str {
        "buoyancy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pool() -> Buoyancy {
        // surface at y = 0, half-height 1, volume 2, water
        Buoyancy::new(1.0, 2.0, 0.0, Buoyancy::WATER_DENSITY)
    }

    #[test]
    fn above_the_surface_threshold_is_dry() {
        let b = pool();
        assert_eq!(b.force_at(1.0), Vector2::ZERO);
        assert_eq!(b.force_at(5.0), Vector2::ZERO);
        // Just below the dry threshold: tiny, not a jump
        assert!(b.force_at(1.0 - 1e-9).y < 1e-3);
    }

    #[test]
    fn below_the_depth_threshold_is_full_force() {
        let b = pool();
        assert_relative_eq!(b.force_at(-1.0).y, 2000.0);
        assert_relative_eq!(b.force_at(-10.0).y, 2000.0);
        // Just above the submerged threshold: approaches full force
        assert_relative_eq!(b.force_at(-1.0 + 1e-9).y, 2000.0, epsilon = 1e-3);
    }

    #[test]
    fn partial_submersion_is_linear() {
        let b = pool();
        assert_relative_eq!(b.force_at(0.0).y, 1000.0);
        assert_relative_eq!(b.force_at(0.5).y, 500.0);
        assert_relative_eq!(b.submerged_fraction(-0.5), 0.75);
    }
}
