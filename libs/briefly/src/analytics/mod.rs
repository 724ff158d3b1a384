use serde::{Deserialize, Serialize};

use crate::common::word_count;

/// Word counts before and after summarization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryAnalytics {
    pub original_words: usize,
    pub summary_words: usize,
    pub reduction_percent: f64,
}

impl SummaryAnalytics {
    pub fn new(original_words: usize, summary_words: usize) -> Self {
        Self {
            original_words,
            summary_words,
            reduction_percent: reduction_percent(original_words, summary_words),
        }
    }

    pub fn from_texts(original: &str, summary: &str) -> Self {
        Self::new(word_count(original), word_count(summary))
    }

    pub fn is_reduction(&self) -> bool {
        self.reduction_percent > 0.0
    }

    /// Percentage as displayed: `0` for empty input, otherwise float text
    /// that keeps a trailing `.0` on whole numbers (`75.0`, `66.67`).
    pub fn reduction_label(&self) -> String {
        if self.original_words == 0 {
            return "0".to_string();
        }
        format!("{:?}", self.reduction_percent)
    }
}

impl std::fmt::Display for SummaryAnalytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Original words: {} | Summary words: {} | Reduction: {}%",
            self.original_words,
            self.summary_words,
            self.reduction_label()
        )
    }
}

/// Percentage of words removed, rounded half to even at two decimals. Zero for
/// empty input; negative when the summary is longer than the original.
pub fn reduction_percent(original_words: usize, summary_words: usize) -> f64 {
    if original_words == 0 {
        return 0.0;
    }
    let ratio = (original_words as f64 - summary_words as f64) / original_words as f64;
    (ratio * 100.0 * 100.0).round_ties_even() / 100.0
}
