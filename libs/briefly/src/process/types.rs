use serde::{Deserialize, Serialize};

use crate::analytics::SummaryAnalytics;
use crate::common::InputType;
use crate::image2text::OcrConfig;
use crate::summarize::{SummarizerConfig, SummaryLength};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub length: SummaryLength,
    pub ocr_config: OcrConfig,
    pub summarizer_config: SummarizerConfig,
}

impl ProcessorConfig {
    pub fn new(length: SummaryLength, ocr_config: OcrConfig, summarizer_config: SummarizerConfig) -> Self {
        Self {
            length,
            ocr_config,
            summarizer_config,
        }
    }
}

/// Problems with the user's input, as opposed to engine or model failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    EmptyInput,
    NoTextDetected,
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::EmptyInput => write!(f, "Enter some text first"),
            PipelineError::NoTextDetected => write!(f, "No text detected in image"),
        }
    }
}

impl std::error::Error for PipelineError {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryReport {
    pub timestamp: String,
    pub input_type: InputType,
    pub length: SummaryLength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    pub cleaned_text: String,
    pub summary: String,
    pub analytics: SummaryAnalytics,
}
