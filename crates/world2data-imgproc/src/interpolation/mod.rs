//! Sampling kernels used when resampling layer data under an affine
//! transform.
//!
//! Coordinates are pixel-space positions along axis 0 and axis 1 (and axis 2
//! for volumes). Samples outside the buffer contribute zero (constant fill),
//! matching the boundary default of the primitive this replaces.

mod cubic;
mod linear;
mod nearest;

use ndarray::{ArrayView2, ArrayView3};

use crate::error::TransformError;

/// Interpolation order, 0 through 5.
///
/// The kernel mapping is defined here: 0 samples the nearest pixel, 1 and 2
/// interpolate linearly, 3 and above use a cubic Catmull-Rom kernel. Orders
/// past 3 do not widen the support further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpolationOrder(u8);

impl InterpolationOrder {
    /// Nearest-neighbor sampling.
    pub const NEAREST: Self = Self(0);
    /// Linear interpolation.
    pub const LINEAR: Self = Self(1);
    /// Cubic interpolation.
    pub const CUBIC: Self = Self(3);

    /// Validate a raw order value.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidOrder`] for values above 5.
    pub fn new(order: u8) -> Result<Self, TransformError> {
        if order > 5 {
            return Err(TransformError::InvalidOrder(order));
        }
        Ok(Self(order))
    }

    /// The raw order value.
    pub fn value(&self) -> u8 {
        self.0
    }

    fn kernel(&self) -> Kernel {
        match self.0 {
            0 => Kernel::Nearest,
            1 | 2 => Kernel::Linear,
            _ => Kernel::Cubic,
        }
    }
}

impl Default for InterpolationOrder {
    fn default() -> Self {
        Self::NEAREST
    }
}

impl TryFrom<u8> for InterpolationOrder {
    type Error = TransformError;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        Self::new(order)
    }
}

#[derive(Debug, Clone, Copy)]
enum Kernel {
    Nearest,
    Linear,
    Cubic,
}

/// Sample a 2D buffer at a fractional (axis-0, axis-1) position.
pub fn sample_plane(img: &ArrayView2<f32>, p0: f64, p1: f64, order: InterpolationOrder) -> f32 {
    match order.kernel() {
        Kernel::Nearest => nearest::nearest_plane(img, p0, p1),
        Kernel::Linear => linear::linear_plane(img, p0, p1),
        Kernel::Cubic => cubic::cubic_plane(img, p0, p1),
    }
}

/// Sample a 3D buffer at a fractional (axis-0, axis-1, axis-2) position.
pub fn sample_volume(
    vol: &ArrayView3<f32>,
    p0: f64,
    p1: f64,
    p2: f64,
    order: InterpolationOrder,
) -> f32 {
    match order.kernel() {
        Kernel::Nearest => nearest::nearest_volume(vol, p0, p1, p2),
        Kernel::Linear => linear::linear_volume(vol, p0, p1, p2),
        Kernel::Cubic => cubic::cubic_volume(vol, p0, p1, p2),
    }
}

/// Zero-fill tap into a 2D buffer.
pub(crate) fn tap_plane(img: &ArrayView2<f32>, i: i64, j: i64) -> f32 {
    let (rows, cols) = img.dim();
    if i < 0 || j < 0 || i >= rows as i64 || j >= cols as i64 {
        return 0.0;
    }
    img[[i as usize, j as usize]]
}

/// Zero-fill tap into a 3D buffer.
pub(crate) fn tap_volume(vol: &ArrayView3<f32>, i: i64, j: i64, k: i64) -> f32 {
    let (d0, d1, d2) = vol.dim();
    if i < 0 || j < 0 || k < 0 || i >= d0 as i64 || j >= d1 as i64 || k >= d2 as i64 {
        return 0.0;
    }
    vol[[i as usize, j as usize, k as usize]]
}
