//! Eigenvalue limiting of symmetric stress and strain tensors.
//!
//! Both routines diagonalize the tensor with a symmetric eigensolver, adjust
//! the spectrum and rebuild the tensor as `V · diag(λ') · V⁻¹`. Inputs must be
//! symmetric; only their lower triangle is read by the default backend.

use glam::{DMat3, DVec3};

use crate::backend::{Decomposer3, JacobiDecomposer};

/// Rescale the whole spectrum of `s` towards zero if it leaves
/// `[-limit, limit]`.
///
/// With `amax = |max λ|` and `amin = |min λ|`, the tensor is returned unchanged
/// when neither exceeds `limit`. Otherwise every eigenvalue is divided by
/// `max(amax, amin) / limit`, so the extreme eigenvalue lands exactly on the
/// limit and the others shrink by the same factor.
///
/// # Example
///
/// ```
/// use smd_math::{limit_eigenvalues, DMat3, DVec3};
///
/// let s = DMat3::from_diagonal(DVec3::new(4.0, -1.0, 2.0));
/// let limited = limit_eigenvalues(&s, 2.0);
/// assert!(limited.abs_diff_eq(DMat3::from_diagonal(DVec3::new(2.0, -0.5, 1.0)), 1e-12));
/// ```
pub fn limit_eigenvalues(s: &DMat3, limit: f64) -> DMat3 {
    limit_eigenvalues_with(&JacobiDecomposer, s, limit)
}

/// [`limit_eigenvalues`] with an explicit decomposition backend.
pub fn limit_eigenvalues_with<D: Decomposer3>(decomposer: &D, s: &DMat3, limit: f64) -> DMat3 {
    let es = decomposer.symmetric_eigen(s);
    let lambda = *es.eigenvalues();

    let amax = lambda.max_element().abs();
    let amin = lambda.min_element().abs();

    if !(amax > limit || amin > limit) {
        return *s;
    }

    // the larger of the two extremes decides the factor for the whole spectrum
    let extreme = if amax > amin { amax } else { amin };
    let scale = extreme / limit;
    let v = *es.eigenvectors();
    v * DMat3::from_diagonal(lambda / scale) * v.inverse()
}

/// Clamp every eigenvalue of `s` into `[min, max]`, in place.
///
/// Returns `true` if any eigenvalue was outside the bounds, in which case `s`
/// is replaced by the clamped tensor. Otherwise `s` is left untouched and
/// `false` is returned. Requires `min <= max`.
///
/// # Example
///
/// ```
/// use smd_math::{limit_min_max_eigenvalues, DMat3, DVec3};
///
/// let mut s = DMat3::from_diagonal(DVec3::new(0.5, 3.0, -2.0));
/// assert!(limit_min_max_eigenvalues(&mut s, -1.0, 1.0));
/// assert!(s.abs_diff_eq(DMat3::from_diagonal(DVec3::new(0.5, 1.0, -1.0)), 1e-12));
/// ```
pub fn limit_min_max_eigenvalues(s: &mut DMat3, min: f64, max: f64) -> bool {
    limit_min_max_eigenvalues_with(&JacobiDecomposer, s, min, max)
}

/// [`limit_min_max_eigenvalues`] with an explicit decomposition backend.
pub fn limit_min_max_eigenvalues_with<D: Decomposer3>(
    decomposer: &D,
    s: &mut DMat3,
    min: f64,
    max: f64,
) -> bool {
    let es = decomposer.symmetric_eigen(s);
    let lambda = *es.eigenvalues();

    if !(lambda.max_element() > max || lambda.min_element() < min) {
        return false;
    }

    let mut clamped = DVec3::ZERO;
    for i in 0..3 {
        clamped[i] = if lambda[i] < min {
            log::trace!("limiting eigenvalue {} --> {}", lambda[i], min);
            min
        } else if lambda[i] > max {
            log::trace!("limiting eigenvalue {} --> {}", lambda[i], max);
            max
        } else {
            lambda[i]
        };
    }

    let v = *es.eigenvectors();
    *s = v * DMat3::from_diagonal(clamped) * v.inverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use smd_linalg::{symmetric_eigen3, Svd3, SymmetricEigen3};

    fn rotated(lambda: DVec3) -> DMat3 {
        let r = DMat3::from_axis_angle(DVec3::new(0.3, -1.0, 0.6).normalize(), 1.2);
        r * DMat3::from_diagonal(lambda) * r.transpose()
    }

    fn sorted_eigenvalues(s: &DMat3) -> [f64; 3] {
        let mut values = symmetric_eigen3(s).eigenvalues().to_array();
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    /// Backend returning a fixed spectrum in the canonical basis.
    struct FixedSpectrum(DVec3);

    impl Decomposer3 for FixedSpectrum {
        fn svd(&self, _: &DMat3) -> Svd3 {
            unreachable!()
        }
        fn symmetric_eigen(&self, _: &DMat3) -> SymmetricEigen3 {
            SymmetricEigen3::new(self.0, DMat3::IDENTITY)
        }
    }

    #[test]
    fn test_limit_eigenvalues_within_limit_is_exact_identity() {
        let s = rotated(DVec3::new(1.5, -0.5, 1.9));
        let limited = limit_eigenvalues(&s, 2.0);
        assert_eq!(limited, s);
    }

    #[test]
    fn test_limit_eigenvalues_scales_by_largest_positive() {
        let s = rotated(DVec3::new(6.0, -1.0, 3.0));
        let limited = limit_eigenvalues(&s, 2.0);
        let values = sorted_eigenvalues(&limited);
        assert_relative_eq!(values[0], -1.0 / 3.0, epsilon = 1e-10);
        assert_relative_eq!(values[1], 1.0, epsilon = 1e-10);
        assert_relative_eq!(values[2], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_limit_eigenvalues_scales_by_most_negative() {
        let s = rotated(DVec3::new(1.0, -8.0, 0.5));
        let limited = limit_eigenvalues(&s, 4.0);
        let values = sorted_eigenvalues(&limited);
        assert_relative_eq!(values[0], -4.0, epsilon = 1e-10);
        assert_relative_eq!(values[1], 0.25, epsilon = 1e-10);
        assert_relative_eq!(values[2], 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_limit_eigenvalues_equal_extremes_use_min_branch() {
        // |max| == |min|: the factor comes from the min branch, same value
        let s = FixedSpectrum(DVec3::new(3.0, 0.0, -3.0));
        let limited = limit_eigenvalues_with(&s, &DMat3::ZERO, 1.5);
        assert!(limited.abs_diff_eq(DMat3::from_diagonal(DVec3::new(1.5, 0.0, -1.5)), 1e-12));
    }

    #[test]
    fn test_limit_eigenvalues_only_min_exceeds() {
        // only the negative extreme is out of range but the factor still
        // applies uniformly to the whole spectrum
        let s = FixedSpectrum(DVec3::new(0.9, -5.0, 0.1));
        let limited = limit_eigenvalues_with(&s, &DMat3::ZERO, 1.0);
        assert!(limited.abs_diff_eq(DMat3::from_diagonal(DVec3::new(0.18, -1.0, 0.02)), 1e-12));
    }

    #[test]
    fn test_limit_eigenvalues_nan_spectrum_is_untouched() {
        let backend = FixedSpectrum(DVec3::splat(f64::NAN));
        let s = DMat3::from_diagonal(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(limit_eigenvalues_with(&backend, &s, 1.0), s);
    }

    #[test]
    fn test_limit_min_max_in_range_is_untouched() {
        let original = rotated(DVec3::new(0.2, 0.9, -0.4));
        let mut s = original;
        assert!(!limit_min_max_eigenvalues(&mut s, -0.5, 1.0));
        assert_eq!(s, original);
    }

    #[test]
    fn test_limit_min_max_clamps_each_eigenvalue() {
        let mut s = rotated(DVec3::new(-3.0, 0.25, 7.0));
        assert!(limit_min_max_eigenvalues(&mut s, -1.0, 2.0));
        let values = sorted_eigenvalues(&s);
        assert_relative_eq!(values[0], -1.0, epsilon = 1e-10);
        assert_relative_eq!(values[1], 0.25, epsilon = 1e-10);
        assert_relative_eq!(values[2], 2.0, epsilon = 1e-10);
        assert!(s.abs_diff_eq(s.transpose(), 1e-12));
    }

    #[test]
    fn test_limit_min_max_degenerate_bounds() {
        let mut s = rotated(DVec3::new(-3.0, 0.25, 7.0));
        assert!(limit_min_max_eigenvalues(&mut s, 1.0, 1.0));
        assert!(s.abs_diff_eq(DMat3::IDENTITY, 1e-10));
    }

    #[test]
    fn test_limit_min_max_nan_spectrum_is_untouched() {
        let backend = FixedSpectrum(DVec3::splat(f64::NAN));
        let original = DMat3::from_diagonal(DVec3::new(5.0, 0.5, -5.0));
        let mut s = original;
        assert!(!limit_min_max_eigenvalues_with(&backend, &mut s, -1.0, 1.0));
        assert_eq!(s, original);
    }

    #[test]
    fn test_limit_min_max_with_stub_backend() {
        let backend = FixedSpectrum(DVec3::new(-2.0, 0.5, 4.0));
        let mut s = DMat3::ZERO;
        assert!(limit_min_max_eigenvalues_with(&backend, &mut s, 0.0, 1.0));
        assert_eq!(s, DMat3::from_diagonal(DVec3::new(0.0, 0.5, 1.0)));
    }
}
