use crate::select::SelectionMode;

/// An error type for the pipeline module.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Error when no layer matches the requested selection mode.
    #[error("{}", .0.empty_message())]
    EmptySelection(SelectionMode),

    /// Error from transform composition or resampling.
    #[error(transparent)]
    Transform(#[from] world2data_imgproc::TransformError),

    /// Error from buffer handling.
    #[error(transparent)]
    Image(#[from] world2data_image::ImageError),

    /// Error when a layer's pixel data cannot be materialized.
    #[error("Failed to materialize pixel data for layer '{layer}': {reason}")]
    Materialize {
        /// Name of the layer.
        layer: String,
        /// Reason reported by the layer source.
        reason: String,
    },

    /// Error when the background worker exits without delivering a result.
    #[error("Conversion worker exited without a result")]
    WorkerLost,
}
