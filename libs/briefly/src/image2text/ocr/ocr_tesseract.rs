use std::collections::HashMap;

use anyhow::Result;
use image::DynamicImage;
use rusty_tesseract::{Args, Image};

use super::{prepare_for_ocr, OcrConfig, OcrEngine};

#[derive(Clone, Debug, Default)]
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Version string reported by the installed `tesseract` binary.
    pub fn version() -> Result<String> {
        rusty_tesseract::get_tesseract_version()
            .map_err(|e| anyhow::anyhow!("Tesseract is not available: {:?}", e))
    }

    fn args(&self) -> Args {
        Args {
            lang: self.config.lang.clone(),
            config_variables: HashMap::new(),
            dpi: self.config.dpi.map(|dpi| dpi as i32),
            psm: Some(self.config.psm.unwrap_or(OcrConfig::get_default_psm()) as i32),
            oem: Some(self.config.oem.unwrap_or(OcrConfig::get_default_oem()) as i32),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn extract_text(&self, image: &DynamicImage) -> Result<String> {
        let gray = prepare_for_ocr(image);
        log::debug!(
            "Running tesseract on {}x{} image, lang={}",
            gray.width(),
            gray.height(),
            self.config.lang
        );

        let ocr_image = Image::from_dynamic_image(&gray)
            .map_err(|e| anyhow::anyhow!("Failed to hand image to tesseract: {:?}", e))?;
        let text = rusty_tesseract::image_to_string(&ocr_image, &self.args())
            .map_err(|e| anyhow::anyhow!("Tesseract failed: {:?}", e))?;

        log::debug!("Tesseract returned {} characters", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_use_tesseract_defaults() {
        let args = TesseractEngine::default().args();
        assert_eq!(args.lang, "eng");
        assert_eq!(args.dpi, None);
        assert_eq!(args.psm, Some(3));
        assert_eq!(args.oem, Some(3));
    }

    #[test]
    fn test_args_follow_config() {
        let engine = TesseractEngine::new(OcrConfig::new(Some("deu".into()), Some(300), Some(6), Some(1)));
        let args = engine.args();
        assert_eq!(args.lang, "deu");
        assert_eq!(args.dpi, Some(300));
        assert_eq!(args.psm, Some(6));
        assert_eq!(args.oem, Some(1));
    }
}
