#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Symmetric eigendecomposition of a 3x3 matrix.
pub mod eigen;

/// Small reductions over 3x3 matrices.
pub mod ops;

/// Module to calculate SVD of a 3x3 matrix
pub mod svd;

pub use eigen::{symmetric_eigen3, SymmetricEigen3};
pub use svd::{svd3, Svd3};
