#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// pixel buffer container over the supported storage types.
pub mod buffer;

/// closed set of pixel encodings and their float conversions.
pub mod encoding;

/// Error types for the image module.
pub mod error;

/// range-safe conversion back to an original encoding.
pub mod requantize;

pub use crate::buffer::PixelBuffer;
pub use crate::encoding::PixelEncoding;
pub use crate::error::ImageError;
pub use crate::requantize::requantize;
