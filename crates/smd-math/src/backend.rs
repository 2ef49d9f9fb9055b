use glam::DMat3;
use smd_linalg::{symmetric_eigen3, svd3, Svd3, SymmetricEigen3};

/// Source of the dense 3x3 decompositions the kernels are built on.
///
/// Implementations must return orthogonal factors: `svd(m)` with
/// `m ≈ U · diag(s) · Vᵀ` and non-negative `s`, and `symmetric_eigen(s)`
/// with `s ≈ V · diag(λ) · Vᵀ`.
pub trait Decomposer3 {
    /// Singular value decomposition of `m`.
    fn svd(&self, m: &DMat3) -> Svd3;

    /// Eigendecomposition of the symmetric matrix `s`.
    fn symmetric_eigen(&self, s: &DMat3) -> SymmetricEigen3;
}

/// Default backend: Jacobi eigenanalysis and Givens QR from `smd-linalg`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JacobiDecomposer;

impl Decomposer3 for JacobiDecomposer {
    #[inline]
    fn svd(&self, m: &DMat3) -> Svd3 {
        svd3(m)
    }

    #[inline]
    fn symmetric_eigen(&self, s: &DMat3) -> SymmetricEigen3 {
        symmetric_eigen3(s)
    }
}

impl<D: Decomposer3 + ?Sized> Decomposer3 for &D {
    fn svd(&self, m: &DMat3) -> Svd3 {
        (**self).svd(m)
    }

    fn symmetric_eigen(&self, s: &DMat3) -> SymmetricEigen3 {
        (**self).symmetric_eigen(s)
    }
}
