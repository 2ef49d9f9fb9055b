//! Drivers applying the kernels to every particle of a simulation.
//!
//! Particle data is expected in struct-of-arrays layout: one slice per tensor
//! field, indexed by particle.

use glam::DMat3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eigenvalues::limit_min_max_eigenvalues;
use crate::polar::{polar_decompose_with_params, PolarParams};

/// Errors that can occur in the batch drivers.
#[derive(Error, Debug, PartialEq)]
pub enum BatchError {
    /// The per-particle slices do not have the same length.
    #[error("slice lengths differ: {deformations} deformations, {rotations} rotations, {stretches} stretches")]
    SizeMismatch {
        /// Number of deformation gradients.
        deformations: usize,
        /// Number of rotation slots.
        rotations: usize,
        /// Number of stretch slots.
        stretches: usize,
    },

    /// The eigenvalue bounds are inverted.
    #[error("eigenvalue bounds are inverted: min {min} > max {max}")]
    InvalidBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Controls how the batch drivers are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatchStrategy {
    /// Use the global Rayon thread pool, one task per particle.
    #[default]
    Parallel,

    /// Run sequentially on the current thread.
    Serial,
}

/// Counters gathered by [`polar_decompose_batch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of particles processed.
    pub total: usize,
    /// Particles whose decomposition went through the improper-rotation repair.
    pub repaired: usize,
    /// Particles left with an improper rotation.
    pub improper: usize,
}

impl BatchSummary {
    fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            repaired: self.repaired + other.repaired,
            improper: self.improper + other.improper,
        }
    }
}

/// Polar-decompose every deformation gradient in place.
///
/// `rotations[i]` and `stretches[i]` receive the factors of
/// `deformations[i]`, which is overwritten with their product.
///
/// # Errors
///
/// Returns [`BatchError::SizeMismatch`] if the slices differ in length.
pub fn polar_decompose_batch(
    deformations: &mut [DMat3],
    rotations: &mut [DMat3],
    stretches: &mut [DMat3],
    params: &PolarParams,
    strategy: BatchStrategy,
) -> Result<BatchSummary, BatchError> {
    if deformations.len() != rotations.len() || deformations.len() != stretches.len() {
        return Err(BatchError::SizeMismatch {
            deformations: deformations.len(),
            rotations: rotations.len(),
            stretches: stretches.len(),
        });
    }

    let decompose_one = |((m, r), t): ((&mut DMat3, &mut DMat3), &mut DMat3)| {
        let pd = polar_decompose_with_params(m, params);
        *r = pd.rotation;
        *t = pd.stretch;
        BatchSummary {
            total: 1,
            repaired: usize::from(pd.repaired),
            improper: usize::from(!pd.proper),
        }
    };

    let summary = match strategy {
        BatchStrategy::Parallel => deformations
            .par_iter_mut()
            .zip(rotations.par_iter_mut())
            .zip(stretches.par_iter_mut())
            .map(decompose_one)
            .reduce(BatchSummary::default, BatchSummary::merge),
        BatchStrategy::Serial => deformations
            .iter_mut()
            .zip(rotations.iter_mut())
            .zip(stretches.iter_mut())
            .map(decompose_one)
            .fold(BatchSummary::default(), BatchSummary::merge),
    };

    log::debug!(
        "polar decomposition of {} particles: {} repaired, {} improper",
        summary.total,
        summary.repaired,
        summary.improper
    );

    Ok(summary)
}

/// Clamp the eigenvalues of every tensor into `[min, max]`, in place.
///
/// Returns the number of tensors that were modified.
///
/// # Errors
///
/// Returns [`BatchError::InvalidBounds`] if `min > max`.
pub fn limit_min_max_eigenvalues_batch(
    tensors: &mut [DMat3],
    min: f64,
    max: f64,
    strategy: BatchStrategy,
) -> Result<usize, BatchError> {
    if min > max {
        return Err(BatchError::InvalidBounds { min, max });
    }

    let clamp_one = |s: &mut DMat3| usize::from(limit_min_max_eigenvalues(s, min, max));

    let clamped: usize = match strategy {
        BatchStrategy::Parallel => tensors.par_iter_mut().map(clamp_one).sum(),
        BatchStrategy::Serial => tensors.iter_mut().map(clamp_one).sum(),
    };

    log::debug!("clamped eigenvalues of {clamped}/{} tensors", tensors.len());

    Ok(clamped)
}
