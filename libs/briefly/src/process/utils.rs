use anyhow::Result;
use image::DynamicImage;

use crate::analytics::SummaryAnalytics;
use crate::clean::clean_text;
use crate::common::{get_current_timestamp_str, InputType};
use crate::image2text::OcrEngine;
use crate::summarize::{summarize_text, Summarizer, SummaryLength};

use super::{PipelineError, SummaryReport};

async fn clean_and_summarize<S: Summarizer>(
    summarizer: &S,
    input_type: InputType,
    text: &str,
    length: SummaryLength,
) -> Result<SummaryReport> {
    let cleaned_text = clean_text(text);
    let summary = summarize_text(summarizer, &cleaned_text, length).await?;
    let analytics = SummaryAnalytics::from_texts(&cleaned_text, &summary);

    log::info!("Summarized {} input: {}", input_type, analytics);

    Ok(SummaryReport {
        timestamp: get_current_timestamp_str(),
        input_type,
        length,
        extracted_text: None,
        cleaned_text,
        summary,
        analytics,
    })
}

pub async fn process_text<S: Summarizer>(
    summarizer: &S,
    text: &str,
    length: SummaryLength,
) -> Result<SummaryReport> {
    if text.trim().is_empty() {
        return Err(PipelineError::EmptyInput.into());
    }
    clean_and_summarize(summarizer, InputType::Text, text, length).await
}

/// Runs OCR; blocks for as long as the engine does.
pub fn extract_image_text<O: OcrEngine + ?Sized>(ocr: &O, image: &DynamicImage) -> Result<String> {
    log::debug!("Extracting text with {}", ocr.name());
    let extracted = ocr.extract_text(image)?;

    if extracted.trim().is_empty() {
        log::warn!("{} found no text in {}x{} image", ocr.name(), image.width(), image.height());
        return Err(PipelineError::NoTextDetected.into());
    }
    Ok(extracted)
}

pub async fn summarize_extracted<S: Summarizer>(
    summarizer: &S,
    extracted: String,
    length: SummaryLength,
) -> Result<SummaryReport> {
    if extracted.trim().is_empty() {
        return Err(PipelineError::NoTextDetected.into());
    }
    let mut report = clean_and_summarize(summarizer, InputType::Image, &extracted, length).await?;
    report.extracted_text = Some(extracted);
    Ok(report)
}

pub async fn process_image<O: OcrEngine + ?Sized, S: Summarizer>(
    ocr: &O,
    summarizer: &S,
    image: &DynamicImage,
    length: SummaryLength,
) -> Result<SummaryReport> {
    let extracted = extract_image_text(ocr, image)?;
    summarize_extracted(summarizer, extracted, length).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::{GenerationParams, TOO_SHORT_MESSAGE};
    use image::{GrayImage, Luma};

    struct FixedOcr(String);

    impl OcrEngine for FixedOcr {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn extract_text(&self, _image: &DynamicImage) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct EchoLength;

    impl Summarizer for EchoLength {
        async fn generate(&self, _prompt: &str, params: &GenerationParams) -> Result<String> {
            Ok(format!("summary between {} and {} tokens", params.min_length, params.max_length))
        }
    }

    fn long_text() -> String {
        "Artificial intelligence helps people sort information quickly. ".repeat(6)
    }

    fn blank_image() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([255])))
    }

    #[tokio::test]
    async fn test_process_text_builds_report() -> Result<()> {
        let report = process_text(&EchoLength, &long_text(), SummaryLength::Long).await?;

        assert_eq!(report.input_type, InputType::Text);
        assert_eq!(report.length, SummaryLength::Long);
        assert!(report.extracted_text.is_none());
        assert_eq!(report.summary, "summary between 80 and 180 tokens");
        assert_eq!(report.analytics.original_words, 42);
        assert_eq!(report.analytics.summary_words, 6);
        assert_eq!(report.analytics.reduction_percent, 85.71);
        Ok(())
    }

    #[tokio::test]
    async fn test_process_text_rejects_blank_input() {
        let err = process_text(&EchoLength, " \n\t ", SummaryLength::Medium).await.unwrap_err();
        assert_eq!(err.downcast_ref::<PipelineError>(), Some(&PipelineError::EmptyInput));
        assert_eq!(err.to_string(), "Enter some text first");
    }

    #[tokio::test]
    async fn test_short_text_reports_message_in_analytics() -> Result<()> {
        let report = process_text(&EchoLength, "Only a handful of words here.", SummaryLength::Short).await?;

        assert_eq!(report.summary, TOO_SHORT_MESSAGE);
        assert_eq!(report.analytics.original_words, 6);
        assert_eq!(report.analytics.summary_words, 6);
        assert_eq!(report.analytics.reduction_percent, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_process_image_keeps_extracted_text() -> Result<()> {
        let ocr_output = "Al assistants\nare al tools that • help people ".repeat(5);
        let ocr = FixedOcr(ocr_output.clone());

        let report = process_image(&ocr, &EchoLength, &blank_image(), SummaryLength::Short).await?;

        assert_eq!(report.input_type, InputType::Image);
        assert_eq!(report.extracted_text.as_deref(), Some(ocr_output.as_str()));
        assert!(!report.cleaned_text.contains('\n'));
        assert!(!report.cleaned_text.contains('•'));
        assert!(report.cleaned_text.contains("are AI tools"));
        assert_eq!(report.summary, "summary between 20 and 60 tokens");
        Ok(())
    }

    #[tokio::test]
    async fn test_process_image_without_text() {
        let err = process_image(&FixedOcr("  \n ".into()), &EchoLength, &blank_image(), SummaryLength::Medium)
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<PipelineError>(), Some(&PipelineError::NoTextDetected));
    }

    #[test]
    fn test_extract_image_text_returns_raw_output() -> Result<()> {
        let text = extract_image_text(&FixedOcr("Line one\nLine two\n".into()), &blank_image())?;
        assert_eq!(text, "Line one\nLine two\n");
        Ok(())
    }

    #[test]
    fn test_report_serializes_without_missing_extracted_text() -> Result<()> {
        let report = SummaryReport {
            timestamp: "2024-01-01 00:00:00".into(),
            input_type: InputType::Text,
            length: SummaryLength::Medium,
            extracted_text: None,
            cleaned_text: "a b".into(),
            summary: "a".into(),
            analytics: SummaryAnalytics::new(2, 1),
        };
        let value = serde_json::to_value(&report)?;

        assert_eq!(value["input_type"], "text");
        assert_eq!(value["length"], "medium");
        assert!(value.get("extracted_text").is_none());
        assert_eq!(value["analytics"]["reduction_percent"], 50.0);
        Ok(())
    }
}
