use ndarray::ArrayD;

use crate::buffer::PixelBuffer;
use crate::encoding::{PixelEncoding, PixelScalar};
use crate::error::ImageError;

/// Find the minimum and maximum values in a float buffer.
///
/// # Errors
///
/// Returns [`ImageError::EmptyBuffer`] if the buffer holds no elements.
pub fn find_min_max(data: &ArrayD<f32>) -> Result<(f32, f32), ImageError> {
    let first = match data.iter().next() {
        Some(x) => *x,
        None => return Err(ImageError::EmptyBuffer),
    };

    let mut min = first;
    let mut max = first;

    for &x in data.iter() {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }

    Ok((min, max))
}

/// Convert a resampled float buffer back to its original encoding, correcting
/// the value range first.
///
/// Interpolation can push values outside [-1, 1]. The correction order is
/// fixed: the buffer is shifted so the minimum becomes exactly -1 before the
/// maximum is checked, since the shift itself can raise the maximum above 1.
/// Both adjustments are advisory and logged, never fatal.
///
/// An [`PixelEncoding::Unsupported`] target leaves the buffer in float and
/// logs a notice.
pub fn requantize(mut data: ArrayD<f32>, target: PixelEncoding) -> PixelBuffer {
    if let Ok((min, _)) = find_min_max(&data) {
        if min < -1.0 {
            log::warn!(
                "data range exceeds the minimum (-1.0) after interpolation; \
                 shifting by {} to allow conversion to {target}; check the \
                 result for artifacts",
                -1.0 - min
            );
            data.mapv_inplace(|v| v + (-1.0 - min));
        }

        // recompute: the shift above can move the maximum
        if let Ok((_, max)) = find_min_max(&data) {
            if max > 1.0 {
                log::warn!(
                    "data range exceeds the maximum (1.0) after interpolation; \
                     rescaling by 1/{max} to allow conversion to {target}; \
                     check the result for artifacts"
                );
                data.mapv_inplace(|v| v / max);
            }
        }
    }

    fn encode<T: PixelScalar>(data: &ArrayD<f32>) -> ArrayD<T> {
        data.mapv(T::from_norm)
    }

    match target {
        PixelEncoding::U8 => PixelBuffer::U8(encode(&data)),
        PixelEncoding::U16 => PixelBuffer::U16(encode(&data)),
        PixelEncoding::I16 => PixelBuffer::I16(encode(&data)),
        PixelEncoding::F32 => PixelBuffer::F32(data),
        PixelEncoding::Unsupported => {
            log::warn!("unsupported original datatype, returning a float32 buffer");
            PixelBuffer::F32(data)
        }
    }
}
