use glam::{DMat3, DVec3};
use smd_linalg::ops::{frobenius_norm, trace};

use crate::backend::{Decomposer3, JacobiDecomposer};

/// Singular values at or below this are not inverted by [`pseudo_inverse_svd`].
pub const PINV_TOLERANCE: f64 = 1.0e-6;

/// Singular values below this are replaced by [`reconstruct_rank_deficient`].
pub const RANK_DEFICIENT_TOLERANCE: f64 = 1.0e-8;

/// Deviatoric part of a tensor, `M - tr(M)/3 · I`.
///
/// # Example
///
/// ```
/// use smd_math::{deviator, DMat3, DVec3};
///
/// let pressure = DMat3::from_diagonal(DVec3::splat(-4.0));
/// assert_eq!(deviator(&pressure), DMat3::ZERO);
/// ```
#[inline]
pub fn deviator(m: &DMat3) -> DMat3 {
    *m - DMat3::IDENTITY * (trace(m) / 3.0)
}

/// Generalized inverse of a possibly near-singular matrix.
///
/// With `M = U · diag(s) · Vᵀ`, returns `V · diag(inv) · Uᵀ` where
/// `inv_i = 1/s_i` for `s_i > PINV_TOLERANCE` and `inv_i = 1` otherwise.
/// Degenerate directions are passed through unscaled rather than dropped, so
/// the result is never rank deficient.
pub fn pseudo_inverse_svd(m: &DMat3) -> DMat3 {
    pseudo_inverse_svd_with(&JacobiDecomposer, m)
}

/// [`pseudo_inverse_svd`] with an explicit decomposition backend.
pub fn pseudo_inverse_svd_with<D: Decomposer3>(decomposer: &D, m: &DMat3) -> DMat3 {
    let svd = decomposer.svd(m);
    let s = *svd.s();

    let mut inv = DVec3::ONE;
    for i in 0..3 {
        if s[i] > PINV_TOLERANCE {
            inv[i] = 1.0 / s[i];
        }
    }

    *svd.v() * DMat3::from_diagonal(inv) * svd.u().transpose()
}

/// Frobenius norm of `a - b`.
///
/// When the norm exceeds `eps` both matrices are written to the log at `warn`
/// level. The norm is returned either way.
pub fn matrices_equal(a: &DMat3, b: &DMat3, eps: f64) -> f64 {
    let norm = frobenius_norm(&(*a - *b));
    if norm > eps {
        log::warn!(
            "matrices A and B are not equal, the L2-norm difference is {norm:e}\nA:\n{a}\nB:\n{b}"
        );
    }
    norm
}

/// Repair a rank-deficient kernel-gradient correction matrix in place.
///
/// Every singular value below [`RANK_DEFICIENT_TOLERANCE`] is set to one and
/// `K` is rebuilt from its singular vectors.
pub fn reconstruct_rank_deficient(k: &mut DMat3) {
    reconstruct_rank_deficient_with(&JacobiDecomposer, k)
}

/// [`reconstruct_rank_deficient`] with an explicit decomposition backend.
pub fn reconstruct_rank_deficient_with<D: Decomposer3>(decomposer: &D, k: &mut DMat3) {
    let svd = decomposer.svd(k);
    let mut s = *svd.s();
    for i in 0..3 {
        if s[i] < RANK_DEFICIENT_TOLERANCE {
            s[i] = 1.0;
        }
    }
    *k = *svd.u() * DMat3::from_diagonal(s) * svd.v().transpose();
}
