use num_traits::{Bounded, NumCast};

/// Pixel encoding of a layer's buffer before it enters the float working domain.
///
/// The set is closed: everything the host hands over that is not one of the
/// four known encodings maps to [`PixelEncoding::Unsupported`] and stays in
/// float after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelEncoding {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 16-bit signed integer.
    I16,
    /// 32-bit float, normalized to [-1, 1].
    F32,
    /// Anything outside the known set.
    Unsupported,
}

impl std::fmt::Display for PixelEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            PixelEncoding::U8 => "uint8",
            PixelEncoding::U16 => "uint16",
            PixelEncoding::I16 => "int16",
            PixelEncoding::F32 => "float32",
            PixelEncoding::Unsupported => "unsupported",
        };
        write!(f, "{name}")
    }
}

/// Scalar types that can move between their native encoding and the
/// normalized f32 working domain.
pub trait PixelScalar: Copy + Default + Send + Sync {
    /// The encoding tag reported for buffers of this scalar.
    const ENCODING: PixelEncoding;

    /// Convert a native value to the normalized float domain.
    fn to_norm(self) -> f32;

    /// Convert a normalized float back to the native encoding.
    fn from_norm(x: f32) -> Self;
}

// Integer encode step shared by the unsigned/signed impls. Values are already
// range-corrected by the requantizer; the cast fallback catches the one
// overflow case left (1.0 * 32768 for i16).
fn encode_scaled<T: Bounded + NumCast>(x: f32, lo: f32, scale: f32) -> T {
    let v = (x.clamp(lo, 1.0) * scale).round();
    NumCast::from(v).unwrap_or_else(T::max_value)
}

impl PixelScalar for u8 {
    const ENCODING: PixelEncoding = PixelEncoding::U8;

    fn to_norm(self) -> f32 {
        self as f32 / 255.0
    }

    fn from_norm(x: f32) -> Self {
        encode_scaled(x, 0.0, 255.0)
    }
}

impl PixelScalar for u16 {
    const ENCODING: PixelEncoding = PixelEncoding::U16;

    fn to_norm(self) -> f32 {
        self as f32 / 65535.0
    }

    fn from_norm(x: f32) -> Self {
        encode_scaled(x, 0.0, 65535.0)
    }
}

impl PixelScalar for i16 {
    const ENCODING: PixelEncoding = PixelEncoding::I16;

    // 32768 rather than 32767 keeps every i16 inside [-1, 1) and makes the
    // round trip exact (both are powers-of-two divisions in f32).
    fn to_norm(self) -> f32 {
        self as f32 / 32768.0
    }

    fn from_norm(x: f32) -> Self {
        encode_scaled(x, -1.0, 32768.0)
    }
}

impl PixelScalar for f32 {
    const ENCODING: PixelEncoding = PixelEncoding::F32;

    fn to_norm(self) -> f32 {
        self
    }

    fn from_norm(x: f32) -> Self {
        x
    }
}

impl PixelScalar for f64 {
    const ENCODING: PixelEncoding = PixelEncoding::Unsupported;

    fn to_norm(self) -> f32 {
        self as f32
    }

    fn from_norm(x: f32) -> Self {
        x as f64
    }
}
