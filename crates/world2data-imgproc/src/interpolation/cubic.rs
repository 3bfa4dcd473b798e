use ndarray::{ArrayView2, ArrayView3};

use super::{tap_plane, tap_volume};

/// Catmull-Rom weights for the four taps around a fractional offset.
fn catmull_rom_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        -0.5 * t3 + t2 - 0.5 * t,
        1.5 * t3 - 2.5 * t2 + 1.0,
        -1.5 * t3 + 2.0 * t2 + 0.5 * t,
        0.5 * t3 - 0.5 * t2,
    ]
}

/// Kernel for cubic interpolation on a plane.
pub(crate) fn cubic_plane(img: &ArrayView2<f32>, p0: f64, p1: f64) -> f32 {
    let i0 = p0.floor() as i64;
    let j0 = p1.floor() as i64;

    let w0 = catmull_rom_weights((p0 - i0 as f64) as f32);
    let w1 = catmull_rom_weights((p1 - j0 as f64) as f32);

    let mut acc = 0.0;
    for (di, wi) in w0.iter().enumerate() {
        for (dj, wj) in w1.iter().enumerate() {
            acc += tap_plane(img, i0 + di as i64 - 1, j0 + dj as i64 - 1) * wi * wj;
        }
    }
    acc
}

/// Kernel for cubic interpolation in a volume.
pub(crate) fn cubic_volume(vol: &ArrayView3<f32>, p0: f64, p1: f64, p2: f64) -> f32 {
    let i0 = p0.floor() as i64;
    let j0 = p1.floor() as i64;
    let k0 = p2.floor() as i64;

    let w0 = catmull_rom_weights((p0 - i0 as f64) as f32);
    let w1 = catmull_rom_weights((p1 - j0 as f64) as f32);
    let w2 = catmull_rom_weights((p2 - k0 as f64) as f32);

    let mut acc = 0.0;
    for (di, wi) in w0.iter().enumerate() {
        for (dj, wj) in w1.iter().enumerate() {
            for (dk, wk) in w2.iter().enumerate() {
                acc += tap_volume(
                    vol,
                    i0 + di as i64 - 1,
                    j0 + dj as i64 - 1,
                    k0 + dk as i64 - 1,
                ) * wi
                    * wj
                    * wk;
            }
        }
    }
    acc
}
