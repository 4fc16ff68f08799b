use image::{imageops, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

/// Maps an 8-bit channel value into `[-1, 1)`.
pub fn normalize(value: u8) -> f32 {
    value as f32 / 128.0 - 1.0
}

pub fn resize_image(image: &DynamicImage, rows: u32) -> RgbImage {
    imageops::resize(
        &image.to_rgb8(),
        rows,
        rows,
        imageops::FilterType::CatmullRom,
    )
}

/// NHWC with a leading batch axis of one.
fn image_to_tensor(rgb: &RgbImage) -> Tensor {
    let (width, height) = rgb.dimensions();
    tract_ndarray::Array4::from_shape_fn(
        (1, height as usize, width as usize, 3),
        |(_, y, x, c)| normalize(rgb.get_pixel(x as u32, y as u32)[c]),
    )
    .into_tensor()
}

pub fn preprocess_image(
    bytes: &[u8],
    rows: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    if rows == 0 {
        return Err("input resolution must be positive".into());
    }

    let image = image::load_from_memory(bytes)?;
    let resized = resize_image(&image, rows);

    Ok(image_to_tensor(&resized))
}
