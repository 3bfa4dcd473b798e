#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// affine transform composition module.
pub mod affine;

/// Error types for the imgproc module.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// affine resampling of planes and volumes.
pub mod resample;

pub use crate::affine::{
    compose_resample_matrix, AffineMatrix, DecomposedTransform, ResampleMatrix, SpatialCase,
};
pub use crate::error::TransformError;
pub use crate::interpolation::InterpolationOrder;
pub use crate::resample::resample;
