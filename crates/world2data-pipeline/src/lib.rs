#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// conversion pipeline orchestration module.
pub mod convert;

/// Error types for the pipeline module.
pub mod error;

/// layer handles and the layer stack.
pub mod layer;

/// layer selection module.
pub mod select;

/// background execution of the pipeline.
pub mod task;

pub use crate::convert::{convert_stack, snapshot_encodings, ConvertOptions, OutputRecord};
pub use crate::error::PipelineError;
pub use crate::layer::{ImageLayer, InMemoryLayer, LayerStack};
pub use crate::select::{select_layers, SelectionMode};
pub use crate::task::ConvertTask;
