use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// 2D vector for physics calculations.
///
/// Value-returning operations leave the operands untouched; the `*_mut`
/// variants write into the receiver without allocating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Negated copy.
    #[inline]
    pub fn inverse(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    #[inline]
    pub fn mult_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    #[inline]
    pub fn dot_product(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.magnitude_square().sqrt()
    }

    #[inline]
    pub fn magnitude_square(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Unit vector in the same direction.
    ///
    /// # Panics
    /// On a zero-magnitude vector. Use [`Vector2::try_normalize`] when the
    /// input may legitimately be zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        degenerate!(len > 0.0, "cannot normalize zero-length vector {:?}", self);
        Self::new(self.x / len, self.y / len)
    }

    #[inline]
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.magnitude();
        if len > 0.0 && len.is_finite() {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Counter-clockwise perpendicular.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    pub fn add_mut(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }

    #[inline]
    pub fn sub_mut(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }

    #[inline]
    pub fn inverse_mut(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
    }

    #[inline]
    pub fn mult_scalar_mut(&mut self, s: f64) {
        self.x *= s;
        self.y *= s;
    }

    /// In-place [`Vector2::normalize`].
    ///
    /// # Panics
    /// On a zero-magnitude vector.
    #[inline]
    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    /// `self += v * s` without a temporary.
    #[inline]
    pub fn add_scaled_mut(&mut self, v: Self, s: f64) {
        self.x += v.x * s;
        self.y += v.y * s;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }
}

impl Add for Vector2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_mut(rhs);
    }
}

impl Sub for Vector2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_mut(rhs);
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.mult_scalar(rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs.mult_scalar(self)
    }
}

impl MulAssign<f64> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.mult_scalar_mut(rhs);
    }
}

impl Neg for Vector2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.inverse()
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}
