/// An error type for the transform and resampling modules.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    /// Error when the layer data is neither 2D nor 3D.
    #[error("Just 2D/3D support: layer data with {0} dimensions is not supported")]
    UnsupportedDimensionality(usize),

    /// Error when an rgb layer does not carry a 3-channel trailing axis.
    #[error("Rgb layer needs a trailing channel axis of size 3, got {0}")]
    InvalidChannelAxis(usize),

    /// Error when the composite affine matrix cannot be inverted.
    #[error("Composite affine transform is singular and cannot be inverted")]
    SingularTransform,

    /// Error when the affine parameters do not match the layer dimensionality.
    #[error("Affine parameters are {affine}D but the layer data is {data}D")]
    DimensionMismatch {
        /// Dimensionality of the supplied affine parameters.
        affine: usize,
        /// Spatial dimensionality of the layer data.
        data: usize,
    },

    /// Error when the interpolation order is outside the accepted range.
    #[error("Interpolation order must be between 0 and 5, got {0}")]
    InvalidOrder(u8),

    /// Error when the buffer shape does not match the resampling matrix.
    #[error("Invalid shape")]
    InvalidShape(#[from] ndarray::ShapeError),
}
