//! Math guard macros
//!
//! Degenerate input (zero-length normalize, NaN state) must fail loudly
//! instead of leaking garbage into the next frame.
//!
//! - `degenerate!` always panics when its condition is violated.
//! - `debug_finite!` checks vectors for NaN/inf in debug builds only and
//!   compiles to nothing in release.
//!
//! Usage:
//! ```rust
//! use kinetica_engine::{debug_finite, degenerate};
//! use kinetica_engine::core::math::Vector2;
//!
//! let v = Vector2::new(3.0, 4.0);
//! degenerate!(v.magnitude() > 0.0, "cannot normalize {:?}", v);
//! debug_finite!(v, "velocity");
//! ```

/// Panic with a descriptive message when a math precondition is violated.
///
/// Active in every build profile.
#[macro_export]
macro_rules! degenerate {
    ($cond:expr, $($msg:tt)+) => {{
        if !$cond {
            panic!("degenerate math: {}", format_args!($($msg)+));
        }
    }};
}

/// Debug-only NaN/infinity check for anything with `x`/`y` fields.
///
/// - Debug: panics naming the offending quantity
/// - Release: zero overhead
#[macro_export]
macro_rules! debug_finite {
    ($v:expr, $what:expr) => {{
        #[cfg(debug_assertions)]
        {
            let v = &$v;
            assert!(
                v.x.is_finite() && v.y.is_finite(),
                "{} is not finite: ({}, {})",
                $what,
                v.x,
                v.y
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::math::Vector2;

    #[test]
    fn degenerate_passes_on_valid_input() {
        let v = Vector2::new(1.0, 0.0);
        degenerate!(v.magnitude() > 0.0, "zero vector {:?}", v);
    }

    #[test]
    #[should_panic(expected = "degenerate math")]
    fn degenerate_panics_on_violation() {
        let v = Vector2::ZERO;
        degenerate!(v.magnitude() > 0.0, "zero vector {:?}", v);
    }

    #[test]
    #[should_panic(expected = "velocity is not finite")]
    #[cfg(debug_assertions)]
    fn debug_finite_catches_nan_in_debug() {
        let v = Vector2::new(f64::NAN, 0.0);
        debug_finite!(v, "velocity");
    }
}
