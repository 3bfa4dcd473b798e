use ndarray::{ArrayD, IxDyn};
use world2data::image::PixelBuffer;
use world2data::imgproc::{DecomposedTransform, InterpolationOrder};
use world2data::pipeline::{ConvertOptions, ConvertTask, InMemoryLayer, LayerStack, SelectionMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut stack = LayerStack::new();

    // a u8 gradient rotated by 30 degrees around the origin
    let gradient = ArrayD::from_shape_fn(IxDyn(&[64, 64]), |i| ((i[0] * 4) % 256) as u8);
    stack.push(
        InMemoryLayer::new("gradient", PixelBuffer::from(gradient), false).with_decomposed(
            DecomposedTransform::Plane {
                rotate: 30.0,
                scale: [1.0, 1.0],
                shear: 0.0,
                translate: [0.0, 0.0],
            },
        ),
    );

    // an i16 volume shifted by 4 pixels along axis 0
    let volume = ArrayD::from_shape_fn(IxDyn(&[16, 32, 32]), |i| (i[0] as i16 - 8) * 100);
    stack.push(
        InMemoryLayer::new("volume", PixelBuffer::from(volume), false).with_decomposed(
            DecomposedTransform::Volume {
                rotate: [0.0; 3],
                scale: [1.0; 3],
                shear: [0.0; 3],
                translate: [4.0, 0.0, 0.0],
            },
        ),
    );

    let options = ConvertOptions {
        mode: SelectionMode::AllLayers,
        order: InterpolationOrder::LINEAR,
        ..Default::default()
    };

    log::info!("starting conversion of {} layers", stack.len());
    let records = ConvertTask::spawn(stack, options).wait()?;

    for record in &records {
        println!(
            "{}: shape {:?}, encoding {}, rgb {}",
            record.name,
            record.data.shape(),
            record.data.encoding(),
            record.rgb
        );
    }

    Ok(())
}
