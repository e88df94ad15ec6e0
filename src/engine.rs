use crate::error::OcrError;
use image::DynamicImage;

/// Recognized text for one image
#[derive(Debug, Clone, Default)]
pub struct OcrResult {
    pub text: String,
    /// Mean confidence in 0.0..=1.0, when the engine reports one
    pub confidence: Option<f32>,
}

/// Trait that all OCR engines must implement
///
/// Recognition is blocking and CPU-bound; callers run it off the async runtime.
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "leptess")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize the text of an already decoded and preprocessed image
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;

    /// Get supported languages
    fn supported_languages(&self) -> Vec<String>;
}
