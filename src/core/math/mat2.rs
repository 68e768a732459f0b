use std::ops::{Add, AddAssign, Mul};

use super::vec2::Vector2;
use super::MathError;

/// A 2x2 matrix stored row-major as `[e0, e1, e2, e3]`:
///
/// ```text
/// | e0 e1 |
/// | e2 e3 |
/// ```
///
/// Used for body orientation and aerodynamic tensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    pub e: [f64; 4],
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2 {
    pub const ZERO: Self = Self { e: [0.0; 4] };

    pub const IDENTITY: Self = Self {
        e: [1.0, 0.0, 0.0, 1.0],
    };

    #[inline]
    pub const fn new(e0: f64, e1: f64, e2: f64, e3: f64) -> Self {
        Self {
            e: [e0, e1, e2, e3],
        }
    }

    /// Rotation by `angle` radians (counter-clockwise):
    /// `[cos, -sin, sin, cos]`.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos)
    }

    #[inline]
    pub fn from_diagonal(a: f64, d: f64) -> Self {
        Self::new(a, 0.0, 0.0, d)
    }

    /// Entry at `(row, col)`, both in `0..2`.
    ///
    /// # Panics
    /// If either index is out of range.
    #[inline]
    pub fn entry(&self, row: usize, col: usize) -> f64 {
        assert!(row < 2 && col < 2, "Matrix2 index ({row}, {col}) out of range");
        self.e[row * 2 + col]
    }

    #[inline]
    pub fn column(&self, col: usize) -> Vector2 {
        Vector2::new(self.entry(0, col), self.entry(1, col))
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.e[0] * self.e[3] - self.e[1] * self.e[2]
    }

    /// Exact-zero check, no epsilon tolerance.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    pub fn inverse(&self) -> Result<Self, MathError> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(MathError::SingularMatrix { determinant: det });
        }
        let inv = 1.0 / det;
        Ok(Self::new(
            self.e[3] * inv,
            -self.e[1] * inv,
            -self.e[2] * inv,
            self.e[0] * inv,
        ))
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new(self.e[0], self.e[2], self.e[1], self.e[3])
    }

    /// Matrix product `self * other`. Order matters.
    #[inline]
    pub fn mult(&self, other: &Self) -> Self {
        let a = &self.e;
        let b = &other.e;
        Self::new(
            a[0] * b[0] + a[1] * b[2],
            a[0] * b[1] + a[1] * b[3],
            a[2] * b[0] + a[3] * b[2],
            a[2] * b[1] + a[3] * b[3],
        )
    }

    #[inline]
    pub fn mult_vector(&self, v: Vector2) -> Vector2 {
        Vector2::new(
            self.e[0] * v.x + self.e[1] * v.y,
            self.e[2] * v.x + self.e[3] * v.y,
        )
    }

    /// Applies the transpose. For a rotation this is the inverse rotation.
    #[inline]
    pub fn transform_transpose(&self, v: Vector2) -> Vector2 {
        Vector2::new(
            self.e[0] * v.x + self.e[2] * v.y,
            self.e[1] * v.x + self.e[3] * v.y,
        )
    }

    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        let mut out = *self;
        out.add_mut(other);
        out
    }

    #[inline]
    pub fn add_mut(&mut self, other: &Self) {
        for (a, b) in self.e.iter_mut().zip(other.e.iter()) {
            *a += b;
        }
    }

    #[inline]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.e[0] * s, self.e[1] * s, self.e[2] * s, self.e[3] * s)
    }

    /// Entry-wise blend: `self * (1 - t) + other * t`.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Matrix2::add(&self.scale(1.0 - t), &other.scale(t))
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.e
            .iter()
            .zip(other.e.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Mul for Matrix2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mult(&rhs)
    }
}

impl Mul<Vector2> for Matrix2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        self.mult_vector(rhs)
    }
}

impl Add for Matrix2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Matrix2::add(&self, &rhs)
    }
}

impl AddAssign for Matrix2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_mut(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-9;

    #[test]
    fn inverse_is_two_sided() {
        let samples = [
            Matrix2::new(4.0, 7.0, 2.0, 6.0),
            Matrix2::new(-1.5, 0.25, 3.0, 8.0),
            Matrix2::from_angle(0.7),
            Matrix2::from_diagonal(1e-3, 250.0),
        ];
        for m in samples {
            assert!(m.is_invertible());
            let inv = m.inverse().unwrap();
            assert!(m.mult(&inv).approx_eq(&Matrix2::IDENTITY, TOL));
            assert!(inv.mult(&m).approx_eq(&Matrix2::IDENTITY, TOL));
        }
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let m = Matrix2::new(1.0, 2.0, 2.0, 4.0);
        assert!(!m.is_invertible());
        assert!(matches!(
            m.inverse(),
            Err(MathError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn mult_is_not_commutative() {
        let a = Matrix2::new(1.0, 2.0, 3.0, 4.0);
        let b = Matrix2::new(0.0, 1.0, 1.0, 0.0);
        assert_eq!(a.mult(&b), Matrix2::new(2.0, 1.0, 4.0, 3.0));
        assert_eq!(b.mult(&a), Matrix2::new(3.0, 4.0, 1.0, 2.0));
    }

    #[test]
    fn entries_are_row_major() {
        let m = Matrix2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.entry(0, 1), 2.0);
        assert_eq!(m.entry(1, 0), 3.0);
        assert_eq!(m.determinant(), -2.0);
        assert_eq!(m.mult_vector(Vector2::new(1.0, 1.0)), Vector2::new(3.0, 7.0));
    }

    #[test]
    fn rotation_matrix_rotates_counter_clockwise() {
        let r = Matrix2::from_angle(FRAC_PI_2);
        let v = r.mult_vector(Vector2::X);
        assert!((v.x).abs() < TOL);
        assert!((v.y - 1.0).abs() < TOL);

        let back = r.transform_transpose(v);
        assert!((back.x - 1.0).abs() < TOL);

        let half = Matrix2::from_angle(PI);
        assert!(half.mult(&half).approx_eq(&Matrix2::IDENTITY, TOL));
    }

    #[test]
    fn add_and_lerp() {
        let mut a = Matrix2::IDENTITY;
        a.add_mut(&Matrix2::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(a, Matrix2::new(2.0, 1.0, 1.0, 2.0));

        let mid = Matrix2::ZERO.lerp(&Matrix2::new(2.0, 4.0, 6.0, 8.0), 0.5);
        assert_eq!(mid, Matrix2::new(1.0, 2.0, 3.0, 4.0));
    }
}
