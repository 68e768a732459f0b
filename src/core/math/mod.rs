mod mat2;
mod vec2;

pub use mat2::Matrix2;
pub use vec2::Vector2;

use std::f64::consts::{PI, TAU};

use thiserror::Error;

/// Errors raised by degenerate linear algebra.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// Matrix has no inverse.
    #[error("matrix is singular (determinant = {determinant})")]
    SingularMatrix {
        /// The offending determinant (always exactly zero).
        determinant: f64,
    },
}

/// Maps any finite angle into the canonical range (-PI, PI].
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid lands exactly on -PI for odd multiples of PI
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
