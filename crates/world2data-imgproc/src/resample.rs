//! Applies a composed resampling matrix to layer data.
//!
//! Output buffers keep the input shape. Each output position is expressed in
//! normalized per-axis coordinates (index / extent), mapped through the
//! d x (d+1) matrix and scaled back to pixel coordinates before sampling.
//! Layers are processed strictly sequentially; there is no internal
//! parallelism.

use ndarray::{Array2, Array3, ArrayD, ArrayView2, ArrayView3, Axis, Ix2, Ix3};

use crate::affine::ResampleMatrix;
use crate::error::TransformError;
use crate::interpolation::{sample_plane, sample_volume, InterpolationOrder};

/// Resample a buffer under an affine transform.
///
/// Dispatches on the matrix variant: a single pass for planes and volumes,
/// and an independent per-channel pass with the identical plane matrix for
/// rgb data (trailing channel axis, channel order preserved).
///
/// # Errors
///
/// Returns [`TransformError::InvalidShape`] if the buffer dimensionality does
/// not match the matrix variant.
pub fn resample(
    data: &ArrayD<f32>,
    matrix: &ResampleMatrix,
    order: InterpolationOrder,
) -> Result<ArrayD<f32>, TransformError> {
    match matrix {
        ResampleMatrix::Plane(m) => {
            let src = data.view().into_dimensionality::<Ix2>()?;
            Ok(resample_plane(&src, m, order).into_dyn())
        }
        ResampleMatrix::RgbPlane(m) => {
            let src = data.view().into_dimensionality::<Ix3>()?;
            let mut out = Array3::<f32>::zeros(src.dim());
            for c in 0..src.dim().2 {
                let channel = src.index_axis(Axis(2), c);
                let resampled = resample_plane(&channel, m, order);
                out.index_axis_mut(Axis(2), c).assign(&resampled);
            }
            Ok(out.into_dyn())
        }
        ResampleMatrix::Volume(m) => {
            let src = data.view().into_dimensionality::<Ix3>()?;
            Ok(resample_volume(&src, m, order).into_dyn())
        }
    }
}

fn resample_plane(src: &ArrayView2<f32>, m: &[f64; 6], order: InterpolationOrder) -> Array2<f32> {
    let (rows, cols) = src.dim();
    let (e0, e1) = (rows as f64, cols as f64);

    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let g0 = i as f64 / e0;
        let g1 = j as f64 / e1;
        let q0 = m[0] * g0 + m[1] * g1 + m[2];
        let q1 = m[3] * g0 + m[4] * g1 + m[5];
        sample_plane(src, q0 * e0, q1 * e1, order)
    })
}

fn resample_volume(src: &ArrayView3<f32>, m: &[f64; 12], order: InterpolationOrder) -> Array3<f32> {
    let (d0, d1, d2) = src.dim();
    let (e0, e1, e2) = (d0 as f64, d1 as f64, d2 as f64);

    Array3::from_shape_fn((d0, d1, d2), |(i, j, k)| {
        let g0 = i as f64 / e0;
        let g1 = j as f64 / e1;
        let g2 = k as f64 / e2;
        let q0 = m[0] * g0 + m[1] * g1 + m[2] * g2 + m[3];
        let q1 = m[4] * g0 + m[5] * g1 + m[6] * g2 + m[7];
        let q2 = m[8] * g0 + m[9] * g1 + m[10] * g2 + m[11];
        sample_volume(src, q0 * e0, q1 * e1, q2 * e2, order)
    })
}
