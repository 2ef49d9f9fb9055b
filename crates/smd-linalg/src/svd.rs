//! 3×3 Singular Value Decomposition (SVD) in double precision.
//!
//! For any matrix A ∈ ℝ³ˣ³ the decomposition is
//!
//! ```text
//! A = U Σ Vᵀ
//! ```
//!
//! where U and V are orthogonal and Σ holds the non-negative singular values
//! sorted in descending order (σ₁ ≥ σ₂ ≥ σ₃ ≥ 0).
//!
//! # Implementation Details
//!
//! * V is obtained from the Jacobi eigenanalysis of AᵀA ([`crate::eigen`]).
//! * The columns of B = A·V are sorted by norm, then B is factored as Q·R with
//!   three Givens rotations. U = Q and Σ = diag(R), with column signs folded
//!   into U so that Σ is non-negative.
//!
//! Because V comes from a unit quaternion, det(V) = +1 and the sign of
//! det(A) ends up in det(U). A negative det(U·Vᵀ) therefore flags an
//! improper (reflecting) input.
//!
//! # Example
//!
//! ```
//! use glam::{DMat3, DVec3};
//! use smd_linalg::svd::svd3;
//!
//! let a = DMat3::from_diagonal(DVec3::new(1.0, 2.0, 3.0));
//! let svd = svd3(&a);
//! assert!(svd.s().abs_diff_eq(DVec3::new(3.0, 2.0, 1.0), 1e-12));
//! assert!(svd.recompose().abs_diff_eq(a, 1e-12));
//! ```

use crate::eigen::{jacobi_eigenanalysis, Symmetric3x3};
use crate::ops::diagonal;
use glam::{DMat3, DVec3};

/// Columns with a norm below this are treated as already reduced in the QR step.
const QR_EPSILON: f64 = 1e-15;

#[derive(Debug)]
/// Cosine and sine of a Givens half-angle used by the QR step.
struct Givens {
    cos_theta: f64,
    sin_theta: f64,
}

#[derive(Debug)]
struct QR3 {
    q: DMat3,
    r: DMat3,
}

/// The factors of a 3x3 SVD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svd3 {
    /// The matrix of left singular vectors.
    u: DMat3,

    /// The singular values.
    s: DVec3,

    /// The matrix of right singular vectors.
    v: DMat3,
}

impl Svd3 {
    /// Assemble a decomposition from its factors.
    pub fn new(u: DMat3, s: DVec3, v: DMat3) -> Self {
        Self { u, s, v }
    }

    /// Get the left singular vectors matrix.
    #[inline]
    pub fn u(&self) -> &DMat3 {
        &self.u
    }

    /// Get the singular values.
    #[inline]
    pub fn s(&self) -> &DVec3 {
        &self.s
    }

    /// Get the right singular vectors matrix.
    #[inline]
    pub fn v(&self) -> &DMat3 {
        &self.v
    }

    /// Rebuild `U · diag(S) · Vᵀ`.
    pub fn recompose(&self) -> DMat3 {
        self.u * DMat3::from_diagonal(self.s) * self.v.transpose()
    }
}

#[inline(always)]
fn cond_swap(c: bool, x: &mut f64, y: &mut f64) {
    if c {
        std::mem::swap(x, y);
    }
}

/// Swap `x` and `y`, negating the vector that moves into `y`.
#[inline(always)]
fn cond_neg_swap_vec3(c: bool, x: &mut DVec3, y: &mut DVec3) {
    if c {
        let z = -*x;
        *x = *y;
        *y = z;
    }
}

/// Sorts the columns of `b` by descending norm and permutes `v` alongside.
///
/// Every swap negates one column so that `det(v)` stays +1.
#[inline(always)]
fn sort_singular_values(b: &mut DMat3, v: &mut DMat3) {
    let mut rho1 = b.x_axis.length_squared();
    let mut rho2 = b.y_axis.length_squared();
    let mut rho3 = b.z_axis.length_squared();

    let c1 = rho1 < rho2;
    cond_swap(c1, &mut rho1, &mut rho2);
    cond_neg_swap_vec3(c1, &mut b.x_axis, &mut b.y_axis);
    cond_neg_swap_vec3(c1, &mut v.x_axis, &mut v.y_axis);

    let c2 = rho1 < rho3;
    cond_swap(c2, &mut rho1, &mut rho3);
    cond_neg_swap_vec3(c2, &mut b.x_axis, &mut b.z_axis);
    cond_neg_swap_vec3(c2, &mut v.x_axis, &mut v.z_axis);

    let c3 = rho2 < rho3;
    cond_neg_swap_vec3(c3, &mut b.y_axis, &mut b.z_axis);
    cond_neg_swap_vec3(c3, &mut v.y_axis, &mut v.z_axis);
}

/// Givens rotation zeroing `a2` against `a1` (Algorithm 4 of McAdams et al.).
#[inline(always)]
fn qr_givens_quaternion(a1: f64, a2: f64) -> Givens {
    let rho = (a1 * a1 + a2 * a2).sqrt();

    let mut g = Givens {
        cos_theta: a1.abs() + f64::max(rho, QR_EPSILON),
        sin_theta: if rho > QR_EPSILON { a2 } else { 0.0 },
    };

    cond_swap(a1 < 0.0, &mut g.sin_theta, &mut g.cos_theta);

    let w = (g.cos_theta * g.cos_theta + g.sin_theta * g.sin_theta)
        .sqrt()
        .recip();
    g.cos_theta *= w;
    g.sin_theta *= w;
    g
}

/// Apply the plane rotation `[[a, b], [-b, a]]` to rows `p` and `q` of every
/// column of `m`.
#[inline(always)]
fn rotate_rows(m: &mut DMat3, p: usize, q: usize, a: f64, b: f64) {
    for i in 0..3 {
        let col = m.col_mut(i);
        let cp = col[p];
        let cq = col[q];
        col[p] = a * cp + b * cq;
        col[q] = -b * cp + a * cq;
    }
}

/// QR decomposition of `b_mat` by three Givens rotations. `b_mat` is reduced
/// to R in place.
fn qr_decomposition(b_mat: &mut DMat3) -> QR3 {
    // zero b[1][0]
    let g1 = qr_givens_quaternion(b_mat.x_axis.x, b_mat.x_axis.y);
    let a1 = -2.0 * g1.sin_theta * g1.sin_theta + 1.0;
    let b1 = 2.0 * g1.cos_theta * g1.sin_theta;
    rotate_rows(b_mat, 0, 1, a1, b1);

    // zero b[2][0]
    let g2 = qr_givens_quaternion(b_mat.x_axis.x, b_mat.x_axis.z);
    let a2 = -2.0 * g2.sin_theta * g2.sin_theta + 1.0;
    let b2 = 2.0 * g2.cos_theta * g2.sin_theta;
    rotate_rows(b_mat, 0, 2, a2, b2);

    // zero b[2][1]
    let g3 = qr_givens_quaternion(b_mat.y_axis.y, b_mat.y_axis.z);
    let a3 = -2.0 * g3.sin_theta * g3.sin_theta + 1.0;
    let b3 = 2.0 * g3.cos_theta * g3.sin_theta;
    rotate_rows(b_mat, 1, 2, a3, b3);

    let r = *b_mat;

    let q1 = DMat3::from_cols(
        DVec3::new(a1, b1, 0.0),
        DVec3::new(-b1, a1, 0.0),
        DVec3::Z,
    );
    let q2 = DMat3::from_cols(
        DVec3::new(a2, 0.0, b2),
        DVec3::Y,
        DVec3::new(-b2, 0.0, a2),
    );
    let q3 = DMat3::from_cols(
        DVec3::X,
        DVec3::new(0.0, a3, b3),
        DVec3::new(0.0, -b3, a3),
    );

    QR3 { q: q1 * q2 * q3, r }
}

/// Compute the SVD of a 3x3 matrix.
///
/// Singular values are non-negative and sorted in descending order.
pub fn svd3(a: &DMat3) -> Svd3 {
    // V diagonalizes AᵀA
    let mut ata = Symmetric3x3::from_dmat3(&(a.transpose() * *a));
    let mut v = jacobi_eigenanalysis(&mut ata);

    let mut b = *a * v;
    sort_singular_values(&mut b, &mut v);

    let qr = qr_decomposition(&mut b);
    let mut u = qr.q;
    let mut s = diagonal(&qr.r);

    for i in 0..3 {
        if s[i] < 0.0 {
            let flipped = -u.col(i);
            *u.col_mut(i) = flipped;
            s[i] = -s[i];
        }
    }

    Svd3 { u, s, v }
}
