use crate::error::OcrError;
use image::DynamicImage;
use imageproc::filter::filter3x3;

// Identity plus a 4-neighbour Laplacian
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Sharpen glyph edges on the luma channel.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let sharpened = filter3x3(&gray, &SHARPEN_KERNEL);
    Ok(DynamicImage::ImageLuma8(sharpened))
}
