use ndarray::{ArrayView2, ArrayView3};

use super::{tap_plane, tap_volume};

/// Kernel for nearest neighbor interpolation on a plane.
pub(crate) fn nearest_plane(img: &ArrayView2<f32>, p0: f64, p1: f64) -> f32 {
    tap_plane(img, p0.round() as i64, p1.round() as i64)
}

/// Kernel for nearest neighbor interpolation in a volume.
pub(crate) fn nearest_volume(vol: &ArrayView3<f32>, p0: f64, p1: f64, p2: f64) -> f32 {
    tap_volume(
        vol,
        p0.round() as i64,
        p1.round() as i64,
        p2.round() as i64,
    )
}
