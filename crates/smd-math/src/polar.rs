//! Polar decomposition `M = R · T` of a deformation gradient.
//!
//! The decomposition is obtained from the SVD `M = U · S · Vᵀ` as
//! `R = U · Vᵀ` and `T = V · S · Vᵀ`.
//!
//! For any physically admissible deformation gradient `det(R) = +1`. When
//! particles interpenetrate, the deformation can invert and the SVD yields an
//! improper rotation with `det(R) = -1`. The inversion direction is then taken
//! to be the singular direction with the smallest singular value: that singular
//! value is negated, the deformation gradient is rebuilt from the flipped
//! factors and decomposed again. This single repair pass is a heuristic; its
//! outcome is reported through [`PolarDecomposition::proper`].
//!
//! Finally the principal stretches are clamped into a physically sane range
//! (see [`PolarParams`]) and `M` is overwritten with `R · T`.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};
use smd_linalg::ops::argmin3;

use crate::backend::{Decomposer3, JacobiDecomposer};

/// Default lower bound for the principal stretches (0.3² ≈ 0.09 principal strain).
pub const MIN_STRETCH: f64 = 0.3;

/// Default upper bound for the principal stretches.
pub const MAX_STRETCH: f64 = 2.0;

/// Maximum `|det(R) - 1|` for the rotation to count as proper.
pub const PROPER_ROTATION_TOLERANCE: f64 = 1e-8;

/// Parameters of [`polar_decompose_with_params`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarParams {
    /// Clamp the principal stretches into `[min_stretch, max_stretch]`.
    pub clamp_stretch: bool,
    /// Lower stretch bound.
    pub min_stretch: f64,
    /// Upper stretch bound.
    pub max_stretch: f64,
    /// Tolerance on `|det(R) - 1|`.
    pub proper_tolerance: f64,
}

impl Default for PolarParams {
    fn default() -> Self {
        Self {
            clamp_stretch: true,
            min_stretch: MIN_STRETCH,
            max_stretch: MAX_STRETCH,
            proper_tolerance: PROPER_ROTATION_TOLERANCE,
        }
    }
}

/// Result of a polar decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarDecomposition {
    /// Rotation `R`.
    pub rotation: DMat3,
    /// Symmetric stretch `T`.
    pub stretch: DMat3,
    /// Whether `det(R)` is within tolerance of +1.
    pub proper: bool,
    /// Whether the improper-rotation repair ran.
    pub repaired: bool,
}

/// Polar decomposition with the default [`PolarParams`].
///
/// `m` is overwritten with the stretch-clamped reconstruction `R · T`.
///
/// # Example
///
/// ```
/// use smd_math::{polar_decompose, DMat3, DVec3};
///
/// let mut f = DMat3::from_diagonal(DVec3::new(1.0, 1.0, -1.0));
/// let pd = polar_decompose(&mut f);
/// assert!(pd.repaired);
/// assert!(pd.proper);
/// assert!((pd.rotation.determinant() - 1.0).abs() < 1e-12);
/// ```
pub fn polar_decompose(m: &mut DMat3) -> PolarDecomposition {
    polar_decompose_with(&JacobiDecomposer, m, &PolarParams::default())
}

/// Polar decomposition with explicit parameters.
pub fn polar_decompose_with_params(m: &mut DMat3, params: &PolarParams) -> PolarDecomposition {
    polar_decompose_with(&JacobiDecomposer, m, params)
}

/// Polar decomposition with an explicit decomposition backend.
pub fn polar_decompose_with<D: Decomposer3>(
    decomposer: &D,
    m: &mut DMat3,
    params: &PolarParams,
) -> PolarDecomposition {
    let mut svd = decomposer.svd(m);
    let mut rotation = *svd.u() * svd.v().transpose();
    let mut repaired = false;

    if rotation.determinant() < 0.0 {
        // improper rotation: flip the smallest singular value and start over
        let mut flipped = *svd.s();
        let imin = argmin3(flipped);
        flipped[imin] = -flipped[imin];

        log::debug!(
            "improper rotation, det(R) = {}; flipping singular value {} at index {}",
            rotation.determinant(),
            svd.s()[imin],
            imin
        );

        let corrected = *svd.u() * DMat3::from_diagonal(flipped) * svd.v().transpose();
        svd = decomposer.svd(&corrected);
        rotation = *svd.u() * svd.v().transpose();
        repaired = true;
    }

    let mut s = *svd.s();
    if params.clamp_stretch {
        s = clamp_stretches(s, params.min_stretch, params.max_stretch);
    }

    let v = *svd.v();
    let stretch = v * DMat3::from_diagonal(s) * v.transpose();
    *m = rotation * stretch;

    let det = rotation.determinant();
    let proper = (det - 1.0).abs() < params.proper_tolerance;
    if !proper {
        log::warn!("polar decomposition left an improper rotation, det(R) = {det}");
    }

    PolarDecomposition {
        rotation,
        stretch,
        proper,
        repaired,
    }
}

#[inline]
fn clamp_stretches(mut s: DVec3, min: f64, max: f64) -> DVec3 {
    for i in 0..3 {
        if s[i] < min {
            s[i] = min;
        } else if s[i] > max {
            s[i] = max;
        }
    }
    s
}
