//! Layer handles as the host viewer exposes them, plus an owned in-memory
//! implementation.

use world2data_image::{PixelBuffer, PixelEncoding};
use world2data_imgproc::{AffineMatrix, DecomposedTransform};

use crate::error::PipelineError;

/// A handle to one image layer of the host viewer.
///
/// A layer carries its display transform twice: as a stored affine matrix and
/// as decomposed rotate/scale/shear/translate parameters. Both express the
/// same data-to-world mapping through different parameterizations; the
/// pipeline composes them and never picks one over the other. Keep both
/// populated (identity where unused).
pub trait ImageLayer: Send {
    /// Layer name as shown in the viewer.
    fn name(&self) -> &str;

    /// Whether the buffer carries a trailing rgb channel axis.
    fn is_rgb(&self) -> bool;

    /// Pixel encoding of the source data. Must be answerable without
    /// materializing a lazy source.
    fn encoding(&self) -> PixelEncoding;

    /// The stored homogeneous affine matrix.
    fn affine(&self) -> AffineMatrix;

    /// The decomposed rotate/scale/shear/translate parameters.
    fn decomposed(&self) -> DecomposedTransform;

    /// Materialize and return the pixel data.
    ///
    /// Lazy sources are computed here, synchronously. This is a blocking call
    /// with no cancellation hook.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Materialize`] when the source cannot deliver
    /// its data.
    fn pixel_data(&self) -> Result<PixelBuffer, PipelineError>;
}

/// An owned layer over an already materialized buffer.
#[derive(Debug, Clone)]
pub struct InMemoryLayer {
    name: String,
    rgb: bool,
    data: PixelBuffer,
    affine: AffineMatrix,
    decomposed: DecomposedTransform,
}

impl InMemoryLayer {
    /// Create a layer with identity transforms.
    ///
    /// The identity dimensionality is derived from the buffer shape and the
    /// rgb flag; shapes outside the 2D/3D set get 2D identities and are
    /// rejected later when the pipeline classifies them.
    pub fn new(name: impl Into<String>, data: PixelBuffer, rgb: bool) -> Self {
        let volume = data.shape().len() == 3 && !rgb;
        let (affine, decomposed) = if volume {
            (
                AffineMatrix::identity_volume(),
                DecomposedTransform::identity_volume(),
            )
        } else {
            (
                AffineMatrix::identity_plane(),
                DecomposedTransform::identity_plane(),
            )
        };
        Self {
            name: name.into(),
            rgb,
            data,
            affine,
            decomposed,
        }
    }

    /// Replace the stored affine matrix.
    pub fn with_affine(mut self, affine: AffineMatrix) -> Self {
        self.affine = affine;
        self
    }

    /// Replace the decomposed transform parameters.
    pub fn with_decomposed(mut self, decomposed: DecomposedTransform) -> Self {
        self.decomposed = decomposed;
        self
    }
}

impl ImageLayer for InMemoryLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_rgb(&self) -> bool {
        self.rgb
    }

    fn encoding(&self) -> PixelEncoding {
        self.data.encoding()
    }

    fn affine(&self) -> AffineMatrix {
        self.affine
    }

    fn decomposed(&self) -> DecomposedTransform {
        self.decomposed
    }

    fn pixel_data(&self) -> Result<PixelBuffer, PipelineError> {
        Ok(self.data.clone())
    }
}

/// The viewer's ordered layer list plus its current selection.
///
/// Selection indices keep the order in which layers were selected, which the
/// `CurrentSelection` mode preserves in its output.
#[derive(Default)]
pub struct LayerStack {
    layers: Vec<Box<dyn ImageLayer>>,
    selection: Vec<usize>,
}

impl LayerStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer, returning its index.
    pub fn push(&mut self, layer: impl ImageLayer + 'static) -> usize {
        self.layers.push(Box::new(layer));
        self.layers.len() - 1
    }

    /// Add a layer index to the current selection (selection order matters).
    pub fn select(&mut self, index: usize) {
        if index < self.layers.len() && !self.selection.contains(&index) {
            self.selection.push(index);
        }
    }

    /// Clear the current selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// All layers, in viewer order.
    pub fn layers(&self) -> &[Box<dyn ImageLayer>] {
        &self.layers
    }

    /// Layer at `index`.
    pub fn layer(&self, index: usize) -> &dyn ImageLayer {
        self.layers[index].as_ref()
    }

    /// Selected indices, in selection order.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
