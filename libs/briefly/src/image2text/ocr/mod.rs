// OCR module structure
mod ocr_tesseract;
pub use ocr_tesseract::TesseractEngine;

mod types;
pub use types::OcrConfig;

use anyhow::Result;
use image::DynamicImage;

/// External text recognizer. Implementations block while the engine runs.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract_text(&self, image: &DynamicImage) -> Result<String>;
}

/// Grayscale conversion, the only preprocessing applied before recognition.
pub fn prepare_for_ocr(image: &DynamicImage) -> DynamicImage {
    image.grayscale()
}
