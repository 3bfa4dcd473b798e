use ndarray::{ArrayView2, ArrayView3};

use super::{tap_plane, tap_volume};

/// Kernel for linear interpolation on a plane.
pub(crate) fn linear_plane(img: &ArrayView2<f32>, p0: f64, p1: f64) -> f32 {
    let i0 = p0.floor() as i64;
    let j0 = p1.floor() as i64;

    let f0 = (p0 - i0 as f64) as f32;
    let f1 = (p1 - j0 as f64) as f32;

    let w00 = (1.0 - f0) * (1.0 - f1);
    let w01 = (1.0 - f0) * f1;
    let w10 = f0 * (1.0 - f1);
    let w11 = f0 * f1;

    tap_plane(img, i0, j0) * w00
        + tap_plane(img, i0, j0 + 1) * w01
        + tap_plane(img, i0 + 1, j0) * w10
        + tap_plane(img, i0 + 1, j0 + 1) * w11
}

/// Kernel for linear interpolation in a volume.
pub(crate) fn linear_volume(vol: &ArrayView3<f32>, p0: f64, p1: f64, p2: f64) -> f32 {
    let i0 = p0.floor() as i64;
    let j0 = p1.floor() as i64;
    let k0 = p2.floor() as i64;

    let f0 = (p0 - i0 as f64) as f32;
    let f1 = (p1 - j0 as f64) as f32;
    let f2 = (p2 - k0 as f64) as f32;

    let w0 = [1.0 - f0, f0];
    let w1 = [1.0 - f1, f1];
    let w2 = [1.0 - f2, f2];

    let mut acc = 0.0;
    for (di, wi) in w0.iter().enumerate() {
        for (dj, wj) in w1.iter().enumerate() {
            for (dk, wk) in w2.iter().enumerate() {
                acc += tap_volume(vol, i0 + di as i64, j0 + dj as i64, k0 + dk as i64)
                    * wi
                    * wj
                    * wk;
            }
        }
    }
    acc
}
