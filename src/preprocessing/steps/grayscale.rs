use crate::error::OcrError;
use image::DynamicImage;

/// Convert a card photo to 8-bit luma.
/// Any alpha channel is dropped; both engines read opaque pixels only.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    Ok(DynamicImage::ImageLuma8(image.to_luma8()))
}
