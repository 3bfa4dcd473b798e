use ndarray::ArrayD;

use crate::encoding::{PixelEncoding, PixelScalar};

/// A materialized pixel buffer in one of the storage types the host can hand
/// over.
///
/// `F64` is the carrier for data outside the supported encoding set; it still
/// flows through the pipeline but reports [`PixelEncoding::Unsupported`] and
/// is returned as float after processing.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// 8-bit unsigned storage.
    U8(ArrayD<u8>),
    /// 16-bit unsigned storage.
    U16(ArrayD<u16>),
    /// 16-bit signed storage.
    I16(ArrayD<i16>),
    /// 32-bit float storage, normalized to [-1, 1].
    F32(ArrayD<f32>),
    /// 64-bit float storage, outside the supported encoding set.
    F64(ArrayD<f64>),
}

impl PixelBuffer {
    /// The encoding tag of the underlying storage.
    pub fn encoding(&self) -> PixelEncoding {
        match self {
            PixelBuffer::U8(_) => PixelEncoding::U8,
            PixelBuffer::U16(_) => PixelEncoding::U16,
            PixelBuffer::I16(_) => PixelEncoding::I16,
            PixelBuffer::F32(_) => PixelEncoding::F32,
            PixelBuffer::F64(_) => PixelEncoding::Unsupported,
        }
    }

    /// Shape of the underlying array.
    pub fn shape(&self) -> &[usize] {
        match self {
            PixelBuffer::U8(a) => a.shape(),
            PixelBuffer::U16(a) => a.shape(),
            PixelBuffer::I16(a) => a.shape(),
            PixelBuffer::F32(a) => a.shape(),
            PixelBuffer::F64(a) => a.shape(),
        }
    }

    /// Convert to the normalized f32 working domain used for resampling.
    ///
    /// Integer encodings are scaled to the unit range, f32 passes through and
    /// f64 is cast down.
    pub fn to_f32(&self) -> ArrayD<f32> {
        fn norm<T: PixelScalar>(a: &ArrayD<T>) -> ArrayD<f32> {
            a.mapv(|v| v.to_norm())
        }
        match self {
            PixelBuffer::U8(a) => norm(a),
            PixelBuffer::U16(a) => norm(a),
            PixelBuffer::I16(a) => norm(a),
            PixelBuffer::F32(a) => a.clone(),
            PixelBuffer::F64(a) => norm(a),
        }
    }
}

impl From<ArrayD<u8>> for PixelBuffer {
    fn from(a: ArrayD<u8>) -> Self {
        PixelBuffer::U8(a)
    }
}

impl From<ArrayD<u16>> for PixelBuffer {
    fn from(a: ArrayD<u16>) -> Self {
        PixelBuffer::U16(a)
    }
}

impl From<ArrayD<i16>> for PixelBuffer {
    fn from(a: ArrayD<i16>) -> Self {
        PixelBuffer::I16(a)
    }
}

impl From<ArrayD<f32>> for PixelBuffer {
    fn from(a: ArrayD<f32>) -> Self {
        PixelBuffer::F32(a)
    }
}

impl From<ArrayD<f64>> for PixelBuffer {
    fn from(a: ArrayD<f64>) -> Self {
        PixelBuffer::F64(a)
    }
}
