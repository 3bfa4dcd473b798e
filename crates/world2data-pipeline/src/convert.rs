//! The conversion pipeline: select, snapshot encodings, then per layer
//! materialize, compose, resample and requantize.

use world2data_image::{requantize, PixelBuffer, PixelEncoding};
use world2data_imgproc::{compose_resample_matrix, resample, InterpolationOrder};

use crate::error::PipelineError;
use crate::layer::LayerStack;
use crate::select::{select_layers, SelectionMode};

/// Suffix appended to converted layer names.
pub const NAME_SUFFIX: &str = "_data";

/// Options for one conversion run, as validated by the host UI.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Which layers to convert.
    pub mode: SelectionMode,
    /// Interpolation order handed to the resampler.
    pub order: InterpolationOrder,
    /// Pass materialized data through unchanged, ignoring all transforms.
    pub trivial: bool,
    /// Convert results back to each layer's original encoding.
    pub preserve_encoding: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            mode: SelectionMode::CurrentSelection,
            order: InterpolationOrder::NEAREST,
            trivial: false,
            preserve_encoding: true,
        }
    }
}

/// One converted layer, ready to hand back to the viewer.
#[derive(Debug, Clone)]
pub struct OutputRecord {
    /// The converted pixel data.
    pub data: PixelBuffer,
    /// Original layer name with [`NAME_SUFFIX`] appended.
    pub name: String,
    /// The layer's rgb flag, carried through unchanged.
    pub rgb: bool,
}

/// Record the original encodings of the selected layers, aligned by position.
///
/// Captured before any resampling so requantization can restore the datatype
/// each layer started with.
pub fn snapshot_encodings(stack: &LayerStack, indices: &[usize]) -> Vec<PixelEncoding> {
    indices.iter().map(|&i| stack.layer(i).encoding()).collect()
}

/// Run the conversion pipeline over a layer stack.
///
/// Layers are processed strictly sequentially, each one fully through
/// emission before the next begins. Trivial mode emits materialized data
/// unchanged. The run aborts on the first layer whose shape or composite
/// transform is unusable; range and encoding issues are advisory and logged.
///
/// # Errors
///
/// * [`PipelineError::EmptySelection`] when the mode matches no layer.
/// * [`PipelineError::Transform`] for unsupported dimensionality or a
///   singular composite transform (aborts the whole run).
/// * [`PipelineError::Materialize`] when a layer source fails to deliver.
pub fn convert_stack(
    stack: &LayerStack,
    options: &ConvertOptions,
) -> Result<Vec<OutputRecord>, PipelineError> {
    let indices = select_layers(stack, &options.mode)?;

    if options.trivial {
        let mut records = Vec::with_capacity(indices.len());
        for &i in &indices {
            let layer = stack.layer(i);
            records.push(OutputRecord {
                data: layer.pixel_data()?,
                name: format!("{}{}", layer.name(), NAME_SUFFIX),
                rgb: layer.is_rgb(),
            });
        }
        return Ok(records);
    }

    let encodings = options
        .preserve_encoding
        .then(|| snapshot_encodings(stack, &indices));
    if let Some(encodings) = &encodings {
        log::debug!("original encodings: {encodings:?}");
    }

    let mut records = Vec::with_capacity(indices.len());
    for (pos, &i) in indices.iter().enumerate() {
        let layer = stack.layer(i);
        log::info!("converting layer '{}' ({}/{})", layer.name(), pos + 1, indices.len());

        let buffer = layer.pixel_data()?;
        let working = buffer.to_f32();

        let matrix = compose_resample_matrix(
            buffer.shape(),
            layer.is_rgb(),
            &layer.affine(),
            &layer.decomposed(),
        )?;
        let resampled = resample(&working, &matrix, options.order)?;

        let data = match &encodings {
            Some(encodings) => requantize(resampled, encodings[pos]),
            None => PixelBuffer::F32(resampled),
        };

        records.push(OutputRecord {
            data,
            name: format!("{}{}", layer.name(), NAME_SUFFIX),
            rgb: layer.is_rgb(),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::InMemoryLayer;
    use ndarray::{ArrayD, IxDyn};
    use world2data_imgproc::{AffineMatrix, TransformError};

    fn gradient_u8(shape: &[usize]) -> PixelBuffer {
        let n: usize = shape.iter().product();
        let data = (0..n).map(|x| (x % 251) as u8).collect();
        PixelBuffer::from(ArrayD::from_shape_vec(IxDyn(shape), data).unwrap())
    }

    fn push_plain(stack: &mut LayerStack, name: &str, shape: &[usize]) {
        stack.push(InMemoryLayer::new(name, gradient_u8(shape), false));
    }

    #[test]
    fn identity_run_restores_bytes() -> Result<(), PipelineError> {
        let mut stack = LayerStack::new();
        push_plain(&mut stack, "img", &[4, 6]);
        let options = ConvertOptions {
            mode: SelectionMode::AllLayers,
            ..Default::default()
        };
        let records = convert_stack(&stack, &options)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "img_data");
        assert_eq!(records[0].data, gradient_u8(&[4, 6]));
        Ok(())
    }

    #[test]
    fn trivial_mode_passes_data_through() -> Result<(), PipelineError> {
        let mut stack = LayerStack::new();
        push_plain(&mut stack, "img", &[4, 6]);
        // a wild affine that trivial mode must ignore
        let affine = AffineMatrix::from_rows_plane([
            [3.0, 1.0, 7.0],
            [0.5, 2.0, -4.0],
            [0.0, 0.0, 1.0],
        ]);
        stack.push(
            InMemoryLayer::new("warped", gradient_u8(&[4, 6]), false).with_affine(affine),
        );
        let options = ConvertOptions {
            mode: SelectionMode::AllLayers,
            trivial: true,
            ..Default::default()
        };
        let records = convert_stack(&stack, &options)?;
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.data, gradient_u8(&[4, 6]));
        }
        Ok(())
    }

    #[test]
    fn no_preserve_returns_float() -> Result<(), PipelineError> {
        let mut stack = LayerStack::new();
        push_plain(&mut stack, "img", &[4, 6]);
        let options = ConvertOptions {
            mode: SelectionMode::AllLayers,
            preserve_encoding: false,
            ..Default::default()
        };
        let records = convert_stack(&stack, &options)?;
        assert!(matches!(records[0].data, PixelBuffer::F32(_)));
        Ok(())
    }

    #[test]
    fn four_dimensional_layer_aborts_run() {
        let mut stack = LayerStack::new();
        push_plain(&mut stack, "ok", &[4, 4]);
        push_plain(&mut stack, "bad", &[2, 2, 2, 2]);
        let options = ConvertOptions {
            mode: SelectionMode::AllLayers,
            ..Default::default()
        };
        let err = convert_stack(&stack, &options).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::UnsupportedDimensionality(4))
        ));
    }

    #[test]
    fn singular_transform_aborts_run() {
        let mut stack = LayerStack::new();
        let affine = AffineMatrix::from_rows_plane([
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        stack.push(InMemoryLayer::new("sing", gradient_u8(&[4, 4]), false).with_affine(affine));
        let options = ConvertOptions {
            mode: SelectionMode::AllLayers,
            ..Default::default()
        };
        let err = convert_stack(&stack, &options).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::SingularTransform)
        ));
    }

    #[test]
    fn snapshot_aligned_by_position() {
        let mut stack = LayerStack::new();
        push_plain(&mut stack, "a", &[2, 2]);
        stack.push(InMemoryLayer::new(
            "b",
            PixelBuffer::from(ArrayD::<i16>::zeros(IxDyn(&[2, 2]))),
            false,
        ));
        let encodings = snapshot_encodings(&stack, &[1, 0]);
        assert_eq!(encodings, [PixelEncoding::I16, PixelEncoding::U8]);
    }

    #[test]
    fn unsupported_encoding_degrades_to_float() -> Result<(), PipelineError> {
        let mut stack = LayerStack::new();
        stack.push(InMemoryLayer::new(
            "f64",
            PixelBuffer::from(ArrayD::<f64>::zeros(IxDyn(&[2, 2]))),
            false,
        ));
        let options = ConvertOptions {
            mode: SelectionMode::AllLayers,
            ..Default::default()
        };
        let records = convert_stack(&stack, &options)?;
        assert!(matches!(records[0].data, PixelBuffer::F32(_)));
        Ok(())
    }

    #[test]
    fn records_follow_input_order() -> Result<(), PipelineError> {
        let mut stack = LayerStack::new();
        push_plain(&mut stack, "one", &[2, 2]);
        push_plain(&mut stack, "two", &[2, 2]);
        push_plain(&mut stack, "three", &[2, 2]);
        let options = ConvertOptions {
            mode: SelectionMode::AllLayers,
            ..Default::default()
        };
        let records = convert_stack(&stack, &options)?;
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["one_data", "two_data", "three_data"]);
        Ok(())
    }
}
