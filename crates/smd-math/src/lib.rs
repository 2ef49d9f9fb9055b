#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Every routine operates on `f64` 3x3 matrices ([`glam::DMat3`]) and is a
//! pure function of its inputs, so particles can be processed independently
//! and in parallel. Routines that need an SVD or a symmetric eigensolver come
//! in two flavours: a plain function using [`JacobiDecomposer`], and a `*_with`
//! variant taking any [`Decomposer3`].

/// Pluggable 3x3 decompositions.
pub mod backend;

/// Per-particle batch drivers.
pub mod batch;

/// Eigenvalue limiting of symmetric tensors.
pub mod eigenvalues;

/// Polar decomposition with improper-rotation repair.
pub mod polar;

/// Scalar magnitude limiting.
pub mod scalar;

/// 2D segment intersection used for crack exclusion.
pub mod segment;

/// Tensor utilities: deviator, pseudo-inverse, equality probe.
pub mod tensor;

pub use backend::{Decomposer3, JacobiDecomposer};
pub use batch::{BatchError, BatchStrategy, BatchSummary};
pub use eigenvalues::{limit_eigenvalues, limit_min_max_eigenvalues};
pub use polar::{polar_decompose, PolarDecomposition, PolarParams};
pub use scalar::{limit_magnitude, limited_magnitude};
pub use tensor::{deviator, matrices_equal, pseudo_inverse_svd, reconstruct_rank_deficient};

pub use glam::{DMat3, DVec2, DVec3};
