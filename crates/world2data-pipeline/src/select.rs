//! Resolution of a selection mode into concrete layer indices.

use crate::error::PipelineError;
use crate::layer::LayerStack;

/// How the pipeline picks the layers to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every layer in the stack, in viewer order.
    AllLayers,
    /// Every layer whose name starts with the given prefix, in viewer order.
    WithPrefix(String),
    /// Every layer whose name ends with the given suffix, in viewer order.
    WithSuffix(String),
    /// The viewer's current selection, in selection order.
    CurrentSelection,
}

impl SelectionMode {
    /// The advisory message reported when the mode matches nothing.
    pub fn empty_message(&self) -> &'static str {
        match self {
            SelectionMode::AllLayers => "No layers found",
            SelectionMode::WithPrefix(_) => "No layers found with given prefix",
            SelectionMode::WithSuffix(_) => "No layers found with given suffix",
            SelectionMode::CurrentSelection => "Select at least one layer",
        }
    }
}

/// Resolve a selection mode into an ordered list of layer indices.
///
/// # Errors
///
/// Returns [`PipelineError::EmptySelection`] with the mode-specific message
/// when nothing matches; callers never see a partial result.
pub fn select_layers(stack: &LayerStack, mode: &SelectionMode) -> Result<Vec<usize>, PipelineError> {
    let indices: Vec<usize> = match mode {
        SelectionMode::AllLayers => (0..stack.len()).collect(),
        SelectionMode::WithPrefix(prefix) => (0..stack.len())
            .filter(|&i| stack.layer(i).name().starts_with(prefix.as_str()))
            .collect(),
        SelectionMode::WithSuffix(suffix) => (0..stack.len())
            .filter(|&i| stack.layer(i).name().ends_with(suffix.as_str()))
            .collect(),
        SelectionMode::CurrentSelection => stack.selection().to_vec(),
    };

    if indices.is_empty() {
        return Err(PipelineError::EmptySelection(mode.clone()));
    }

    Ok(indices)
}
