//! Per-light quadratic shading model.
//!
//! Each light direction gets a local model `q(n) = nᵀAn + bᵀn + c` with a
//! symmetric 3×3 `A`, evaluated against the pixel's surface normal and
//! clamped at zero (radiance is non-negative).

use nalgebra::{Matrix3, Vector3};

/// Number of parameters of one light's quadratic model:
/// 6 for symmetric A, 3 for b, 1 for c.
pub const QUADRATIC_PARAMS: usize = 10;

/// A reconstructed quadratic shading model for one light direction.
#[derive(Debug, Clone, Copy)]
pub struct QuadraticModel {
    /// Symmetric quadratic term.
    pub a: Matrix3<f64>,
    /// Linear term.
    pub b: Vector3<f64>,
    /// Constant term.
    pub c: f64,
}

impl QuadraticModel {
    /// Unpack a model from its 10-parameter slice.
    ///
    /// Layout: `[a00, a01, a02, a11, a12, a22, b0, b1, b2, c]`: the upper
    /// triangle of A row by row, mirrored into the full symmetric matrix.
    pub fn from_params(p: &[f64]) -> Self {
        debug_assert_eq!(p.len(), QUADRATIC_PARAMS);
        let a = Matrix3::new(
            p[0], p[1], p[2], //
            p[1], p[3], p[4], //
            p[2], p[4], p[5],
        );
        Self {
            a,
            b: Vector3::new(p[6], p[7], p[8]),
            c: p[9],
        }
    }

    /// Evaluate the clamped intensity `max(nᵀAn + bᵀn + c, 0)`.
    pub fn intensity(&self, n: &Vector3<f64>) -> f64 {
        let an = self.a * n;
        (n.dot(&an) + self.b.dot(n) + self.c).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unpack_is_symmetric() {
        let p = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 0.0, 0.0, 0.0];
        let m = QuadraticModel::from_params(&p);
        assert_eq!(m.a, m.a.transpose());
        assert_eq!(m.a[(0, 1)], 2.0);
        assert_eq!(m.a[(1, 0)], 2.0);
        assert_eq!(m.a[(2, 2)], 6.0);
    }

    #[test]
    fn test_intensity_matches_reference() {
        let p = [
            0.5, -0.2, 0.1, //
            0.3, 0.4, -0.6, //
            1.0, -2.0, 0.5, //
            0.25,
        ];
        let m = QuadraticModel::from_params(&p);
        let n = Vector3::new(0.3, -0.7, 0.648);

        // Reference: explicit scalar expansion of n'An + b'n + c.
        let (n0, n1, n2) = (n.x, n.y, n.z);
        let ntan = p[0] * n0 * n0
            + p[3] * n1 * n1
            + p[5] * n2 * n2
            + 2.0 * (p[1] * n0 * n1 + p[2] * n0 * n2 + p[4] * n1 * n2);
        let expected = (ntan + p[6] * n0 + p[7] * n1 + p[8] * n2 + p[9]).max(0.0);

        assert_relative_eq!(m.intensity(&n), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_radiance_clamps_to_zero() {
        let mut p = [0.0; 10];
        p[9] = -1.0;
        let m = QuadraticModel::from_params(&p);
        assert_eq!(m.intensity(&Vector3::new(0.1, 0.2, 0.97)), 0.0);
    }
}
