//! Polynomial basis over normalized image coordinates.
//!
//! Model parameters vary smoothly across the image plane; that variation is
//! encoded as coefficients of a bivariate polynomial of total degree up to 6.
//! This module builds the monomial feature vector a fit column is dotted
//! against, and validates the admissible feature counts.

/// Number of monomial terms of total degree <= 6 in two variables.
pub const NUM_FEATURES: usize = 28;

/// Admissible feature counts: (d+1)(d+2)/2 for polynomial degree d = 0..6.
const FEATURE_COUNTS: [usize; 7] = [1, 3, 6, 10, 15, 21, 28];

/// Returns true iff `n` is a valid number of polynomial features.
///
/// A fit matrix must have one row per feature, so this is the gate on every
/// fit matrix's row count before projection.
pub fn is_valid_feature_count(n: usize) -> bool {
    FEATURE_COUNTS.contains(&n)
}

/// Build the 28-term monomial feature vector for a normalized coordinate.
///
/// Ordering is fixed: all degree-6 monomials (7 terms, highest x power
/// first), then degree 5 (6 terms), ... down to degree 1 (`x`, `y`), then
/// the constant `1.0` last.
///
/// A model fit with fewer features uses the SUFFIX of this table: for
/// `n_features = nx`, projection reads the last `nx` entries (offset
/// `28 - nx`), i.e. the lowest-degree terms ending with the constant. The
/// offset is `28 - nx`, never `nx`.
pub fn basis_features(x: f64, y: f64) -> [f64; NUM_FEATURES] {
    let x2 = x * x;
    let y2 = y * y;
    let x3 = x2 * x;
    let y3 = y2 * y;

    [
        // degree 6
        x3 * x3,
        x3 * x2 * y,
        x2 * x2 * y2,
        x3 * y3,
        x2 * y2 * y2,
        x * y3 * y2,
        y3 * y3,
        // degree 5
        x3 * x2,
        x2 * x2 * y,
        x3 * y2,
        x2 * y3,
        x * y2 * y2,
        y3 * y2,
        // degree 4
        x2 * x2,
        x3 * y,
        x2 * y2,
        x * y3,
        y2 * y2,
        // degree 3
        x3,
        x2 * y,
        x * y2,
        y3,
        // degree 2
        x2,
        x * y,
        y2,
        // degree 1
        x,
        y,
        // constant
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_valid_feature_counts() {
        for n in [1, 3, 6, 10, 15, 21, 28] {
            assert!(is_valid_feature_count(n), "{n} should be valid");
        }
        for n in [0, 2, 4, 29] {
            assert!(!is_valid_feature_count(n), "{n} should be invalid");
        }
    }

    #[test]
    fn test_basis_is_deterministic() {
        let a = basis_features(0.31, -0.47);
        let b = basis_features(0.31, -0.47);
        // Bit-identical, not just approximately equal.
        assert_eq!(a, b);
    }

    #[test]
    fn test_basis_low_order_terms() {
        let x = 0.5;
        let y = -0.25;
        let f = basis_features(x, y);

        assert_relative_eq!(f[27], 1.0);
        assert_relative_eq!(f[26], y);
        assert_relative_eq!(f[25], x);
        assert_relative_eq!(f[24], y * y);
        assert_relative_eq!(f[23], x * y);
        assert_relative_eq!(f[22], x * x);
    }

    #[test]
    fn test_basis_high_order_terms() {
        let x = -0.4;
        let y = 0.3;
        let f = basis_features(x, y);

        assert_relative_eq!(f[0], x.powi(6), epsilon = 1e-15);
        assert_relative_eq!(f[3], x.powi(3) * y.powi(3), epsilon = 1e-15);
        assert_relative_eq!(f[6], y.powi(6), epsilon = 1e-15);
        assert_relative_eq!(f[7], x.powi(5), epsilon = 1e-15);
        assert_relative_eq!(f[13], x.powi(4), epsilon = 1e-15);
        assert_relative_eq!(f[18], x.powi(3), epsilon = 1e-15);
    }

    #[test]
    fn test_basis_at_origin() {
        // At (0,0) every monomial vanishes except the constant.
        let f = basis_features(0.0, 0.0);
        for term in &f[..27] {
            assert_eq!(*term, 0.0);
        }
        assert_eq!(f[27], 1.0);
    }
}
