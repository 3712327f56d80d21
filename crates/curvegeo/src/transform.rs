//! 2D affine maps used to move, turn and resize polylines.
//!
//! - `Affine2`: `x ↦ M x + t`, with constructors for the three editor moves
//!   (translate, rotate about a pivot, scale about a pivot).
//!
//! Code cross-refs: `Polyline::transform`, `Curve::transform`

use nalgebra::{Matrix2, Vector2};

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn translation(d: Vector2<f64>) -> Self {
        Self {
            m: Matrix2::identity(),
            t: d,
        }
    }

    /// Counter-clockwise rotation by `angle` radians about `pivot`.
    pub fn rotation_about(pivot: Vector2<f64>, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let m = Matrix2::new(c, -s, s, c);
        Self {
            m,
            t: pivot - m * pivot,
        }
    }

    /// Independent x/y scaling about `pivot`.
    pub fn scaling_about(pivot: Vector2<f64>, sx: f64, sy: f64) -> Self {
        let m = Matrix2::new(sx, 0.0, 0.0, sy);
        Self {
            m,
            t: pivot - m * pivot,
        }
    }

    /// Inverse map if `m` is invertible.
    ///
    /// Returns `None` if `det(M) ≈ 0`.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    /// Composition `self ∘ other`.
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }

    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }

    /// Orientation-reversing maps (mirror, negative scale) flip handedness.
    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.m.determinant() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn rotation_about_pivot_keeps_pivot() {
        let pivot = vector![1.0, 2.0];
        let f = Affine2::rotation_about(pivot, std::f64::consts::FRAC_PI_2);
        assert!((f.apply(pivot) - pivot).norm() < 1e-12);
        let q = f.apply(vector![2.0, 2.0]);
        assert!((q - vector![1.0, 3.0]).norm() < 1e-12);
        assert!(f.is_orientation_preserving());
    }

    #[test]
    fn compose_then_inverse_is_identity() {
        let a = Affine2::scaling_about(vector![0.5, -1.0], 2.0, 3.0);
        let b = Affine2::translation(vector![4.0, 1.0]);
        let ab = a.compose(&b);
        let inv = ab.inverse().unwrap();
        let p = vector![0.3, 0.7];
        assert!((inv.apply(ab.apply(p)) - p).norm() < 1e-12);
        assert!(Affine2::scaling_about(vector![0.0, 0.0], -1.0, 1.0)
            .inverse()
            .is_some());
        assert!(!Affine2::scaling_about(vector![0.0, 0.0], -1.0, 1.0).is_orientation_preserving());
    }
}
