//! Jacobi eigenanalysis of symmetric 3×3 matrices.
//!
//! The solver sweeps over the three off-diagonal pairs, annihilating each one
//! with an exact Givens rotation, and accumulates the rotations into a unit
//! quaternion. Keeping the accumulated rotation as a quaternion means the
//! eigenvector matrix stays orthonormal to machine precision regardless of the
//! number of sweeps.
//!
//! ```
//! use glam::{DMat3, DVec3};
//! use smd_linalg::eigen::symmetric_eigen3;
//!
//! let s = DMat3::from_diagonal(DVec3::new(3.0, -1.0, 2.0));
//! let es = symmetric_eigen3(&s);
//! let v = *es.eigenvectors();
//! let recomposed = v * DMat3::from_diagonal(*es.eigenvalues()) * v.transpose();
//! assert!(recomposed.abs_diff_eq(s, 1e-12));
//! ```
//!
//! # References
//!
//! * McAdams, Selle, Tamstorf, Teran, and Sifakis (2011).
//!   "Computing the Singular Value Decomposition of 3x3 matrices with minimal
//!   branching and elementary floating point operations."

use glam::{DMat3, DQuat, DVec3};
use std::f64::consts::FRAC_PI_4;

/// Upper bound on the number of cyclic sweeps.
const MAX_SWEEPS: usize = 12;

/// Sweeps stop once the squared off-diagonal mass drops below this fraction
/// of the squared mass of the input.
const OFF_DIAGONAL_TOLERANCE: f64 = 1e-30;

#[derive(Debug, Clone, Copy)]
/// Lower triangle of a symmetric 3x3 matrix.
pub(crate) struct Symmetric3x3 {
    m_00: f64,
    m_10: f64,
    m_11: f64,
    m_20: f64,
    m_21: f64,
    m_22: f64,
}

impl Symmetric3x3 {
    /// Read the lower triangle of `mat`. The upper triangle is ignored.
    pub(crate) fn from_dmat3(mat: &DMat3) -> Self {
        Symmetric3x3 {
            m_00: mat.x_axis.x,
            m_10: mat.x_axis.y,
            m_11: mat.y_axis.y,
            m_20: mat.x_axis.z,
            m_21: mat.y_axis.z,
            m_22: mat.z_axis.z,
        }
    }

    fn diagonal(&self) -> DVec3 {
        DVec3::new(self.m_00, self.m_11, self.m_22)
    }

    fn off_diagonal_norm_sq(&self) -> f64 {
        self.m_10 * self.m_10 + self.m_20 * self.m_20 + self.m_21 * self.m_21
    }

    fn norm_sq(&self) -> f64 {
        let d = self.diagonal();
        d.length_squared() + self.off_diagonal_norm_sq()
    }
}

/// Cosine and sine of the quaternion half-angle of a Givens rotation.
#[derive(Debug)]
struct Givens {
    cos_half: f64,
    sin_half: f64,
}

impl Givens {
    const IDENTITY: Givens = Givens {
        cos_half: 1.0,
        sin_half: 0.0,
    };

    /// Double-angle form `(cos θ, sin θ)` used for the conjugation.
    #[inline(always)]
    fn full_angle(&self) -> (f64, f64) {
        let c2 = self.cos_half * self.cos_half;
        let s2 = self.sin_half * self.sin_half;
        (c2 - s2, 2.0 * self.sin_half * self.cos_half)
    }
}

/// Exact rotation zeroing `s_pq` in the 2x2 block `[[s_pp, s_pq], [s_pq, s_qq]]`.
///
/// The angle is folded into `[-π/4, π/4]` so that every sweep converges
/// quadratically.
#[inline(always)]
fn givens_parameters(s_pp: f64, s_qq: f64, s_pq: f64) -> Givens {
    if s_pq == 0.0 {
        return Givens::IDENTITY;
    }
    let mut theta = 0.5 * (2.0 * s_pq).atan2(s_pp - s_qq);
    if theta > FRAC_PI_4 {
        theta -= 2.0 * FRAC_PI_4;
    } else if theta < -FRAC_PI_4 {
        theta += 2.0 * FRAC_PI_4;
    }
    let half = 0.5 * theta;
    Givens {
        cos_half: half.cos(),
        sin_half: half.sin(),
    }
}

#[inline(always)]
fn conjugate_xy(s: &mut Symmetric3x3, q: &mut DQuat) {
    let g = givens_parameters(s.m_00, s.m_11, s.m_10);
    let (a, b) = g.full_angle();

    let s00 = s.m_00;
    let s10 = s.m_10;
    let s11 = s.m_11;
    let s20 = s.m_20;
    let s21 = s.m_21;

    s.m_00 = a * (a * s00 + b * s10) + b * (a * s10 + b * s11);
    s.m_10 = a * (-b * s00 + a * s10) + b * (-b * s10 + a * s11);
    s.m_11 = -b * (-b * s00 + a * s10) + a * (-b * s10 + a * s11);
    s.m_20 = a * s20 + b * s21;
    s.m_21 = -b * s20 + a * s21;

    // q <- q * (rotation about z)
    let tmp_x = q.x * g.sin_half;
    let tmp_y = q.y * g.sin_half;
    let tmp_z = q.z * g.sin_half;
    let sin_w = q.w * g.sin_half;

    q.z = q.z * g.cos_half + sin_w;
    q.w = q.w * g.cos_half - tmp_z;
    q.x = q.x * g.cos_half + tmp_y;
    q.y = q.y * g.cos_half - tmp_x;
}

#[inline(always)]
fn conjugate_yz(s: &mut Symmetric3x3, q: &mut DQuat) {
    let g = givens_parameters(s.m_11, s.m_22, s.m_21);
    let (a, b) = g.full_angle();

    let s11 = s.m_11;
    let s21 = s.m_21;
    let s22 = s.m_22;
    let s10 = s.m_10;
    let s20 = s.m_20;

    s.m_11 = a * (a * s11 + b * s21) + b * (a * s21 + b * s22);
    s.m_21 = a * (-b * s11 + a * s21) + b * (-b * s21 + a * s22);
    s.m_22 = -b * (-b * s11 + a * s21) + a * (-b * s21 + a * s22);
    s.m_10 = a * s10 + b * s20;
    s.m_20 = -b * s10 + a * s20;

    // q <- q * (rotation about x)
    let tmp_x = q.x * g.sin_half;
    let tmp_y = q.y * g.sin_half;
    let tmp_z = q.z * g.sin_half;
    let sin_w = q.w * g.sin_half;

    q.x = q.x * g.cos_half + sin_w;
    q.w = q.w * g.cos_half - tmp_x;
    q.y = q.y * g.cos_half + tmp_z;
    q.z = q.z * g.cos_half - tmp_y;
}

#[inline(always)]
fn conjugate_xz(s: &mut Symmetric3x3, q: &mut DQuat) {
    let g = givens_parameters(s.m_00, s.m_22, s.m_20);
    let (a, b) = g.full_angle();

    let s00 = s.m_00;
    let s20 = s.m_20;
    let s22 = s.m_22;
    let s10 = s.m_10;
    let s21 = s.m_21;

    s.m_00 = a * (a * s00 + b * s20) + b * (a * s20 + b * s22);
    s.m_20 = a * (-b * s00 + a * s20) + b * (-b * s20 + a * s22);
    s.m_22 = -b * (-b * s00 + a * s20) + a * (-b * s20 + a * s22);
    s.m_10 = a * s10 + b * s21;
    s.m_21 = -b * s10 + a * s21;

    // q <- q * (rotation about y). The x-z plane is traversed from z to x,
    // so the accumulated rotation uses the negated half-angle.
    let sin_half = -g.sin_half;
    let tmp_x = q.x * sin_half;
    let tmp_y = q.y * sin_half;
    let tmp_z = q.z * sin_half;
    let sin_w = q.w * sin_half;

    q.y = q.y * g.cos_half + sin_w;
    q.w = q.w * g.cos_half - tmp_y;
    q.z = q.z * g.cos_half + tmp_x;
    q.x = q.x * g.cos_half - tmp_z;
}

/// Diagonalize `s` in place and return the accumulated rotation `Q` such that
/// `Qᵀ · S · Q` is the diagonalized matrix.
pub(crate) fn jacobi_eigenanalysis(s: &mut Symmetric3x3) -> DMat3 {
    let mut q = DQuat::IDENTITY;
    let threshold = OFF_DIAGONAL_TOLERANCE * s.norm_sq();
    for _ in 0..MAX_SWEEPS {
        conjugate_xy(s, &mut q);
        conjugate_yz(s, &mut q);
        conjugate_xz(s, &mut q);

        if s.off_diagonal_norm_sq() <= threshold {
            break;
        }
    }
    DMat3::from_quat(q.normalize())
}

/// Eigendecomposition `S = V · diag(λ) · Vᵀ` of a symmetric 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricEigen3 {
    eigenvalues: DVec3,
    eigenvectors: DMat3,
}

impl SymmetricEigen3 {
    /// Assemble a decomposition from its parts.
    ///
    /// `eigenvectors` holds one eigenvector per column, matching the order of
    /// `eigenvalues`.
    pub fn new(eigenvalues: DVec3, eigenvectors: DMat3) -> Self {
        Self {
            eigenvalues,
            eigenvectors,
        }
    }

    /// The eigenvalues, in solver order (not sorted).
    #[inline]
    pub fn eigenvalues(&self) -> &DVec3 {
        &self.eigenvalues
    }

    /// The orthonormal eigenvectors, one per column.
    #[inline]
    pub fn eigenvectors(&self) -> &DMat3 {
        &self.eigenvectors
    }
}

/// Compute the eigendecomposition of a symmetric matrix.
///
/// Only the lower triangle of `s` is read. Eigenvalues are returned in the
/// order the sweeps leave them on the diagonal.
pub fn symmetric_eigen3(s: &DMat3) -> SymmetricEigen3 {
    let mut sym = Symmetric3x3::from_dmat3(s);
    let eigenvectors = jacobi_eigenanalysis(&mut sym);
    SymmetricEigen3 {
        eigenvalues: sym.diagonal(),
        eigenvectors,
    }
}
