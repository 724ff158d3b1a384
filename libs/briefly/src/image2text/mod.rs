mod ocr;
pub use ocr::{prepare_for_ocr, OcrConfig, OcrEngine, TesseractEngine};
