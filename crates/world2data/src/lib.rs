#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use world2data_image as image;

#[doc(inline)]
pub use world2data_imgproc as imgproc;

#[doc(inline)]
pub use world2data_pipeline as pipeline;
