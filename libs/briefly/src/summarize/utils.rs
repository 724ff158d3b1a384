use anyhow::Result;

use crate::clean::{smart_clean, structure_ocr_text};
use crate::common::word_count;

use super::{GenerationParams, Summarizer, SummaryLength};

pub const PROMPT_PREFIX: &str = "Summarize clearly in simple sentences: ";
pub const TOO_SHORT_MESSAGE: &str = "Text too short to summarize properly.";
pub const MIN_SUMMARY_WORDS: usize = 25;

pub fn is_too_short(text: &str) -> bool {
    word_count(text) < MIN_SUMMARY_WORDS
}

/// Prefixes the instruction and clips the prompt to `max_input_tokens` words.
/// A word is at least one token, so the model still sees its own truncation
/// limit first when the clip is not reached.
pub fn build_prompt(text: &str, params: &GenerationParams) -> String {
    let prompt = format!("{}{}", PROMPT_PREFIX, text);
    if word_count(&prompt) <= params.max_input_tokens {
        return prompt;
    }

    log::debug!("Clipping prompt to {} words", params.max_input_tokens);
    prompt
        .split_whitespace()
        .take(params.max_input_tokens)
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn summarize_text<S: Summarizer>(
    summarizer: &S,
    text: &str,
    length: SummaryLength,
) -> Result<String> {
    let text = structure_ocr_text(&smart_clean(text));

    if is_too_short(&text) {
        log::info!("Input has {} words, skipping model call", word_count(&text));
        return Ok(TOO_SHORT_MESSAGE.to_string());
    }

    let params = length.generation_params();
    let prompt = build_prompt(&text, &params);
    log::debug!(
        "Generating {} summary (min={}, max={}) from {} words",
        length,
        params.min_length,
        params.max_length,
        word_count(&text)
    );

    let summary = summarizer.generate(&prompt, &params).await?;
    Ok(summary.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSummarizer {
        calls: Mutex<Vec<(String, GenerationParams)>>,
    }

    impl Summarizer for RecordingSummarizer {
        async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), params.clone()));
            Ok("  A tidy summary.  ".to_string())
        }
    }

    struct FailingSummarizer;

    impl Summarizer for FailingSummarizer {
        async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String> {
            anyhow::bail!("model unavailable")
        }
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[tokio::test]
    async fn test_short_input_skips_model() -> Result<()> {
        let summarizer = RecordingSummarizer::default();
        let summary = summarize_text(&summarizer, &words(24), SummaryLength::Long).await?;

        assert_eq!(summary, TOO_SHORT_MESSAGE);
        assert!(summarizer.calls.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_word_count_is_taken_after_cleaning() -> Result<()> {
        // symbols-only tokens disappear during cleaning
        let raw = format!("{} ★ ★ ★ ★", words(22));
        let summarizer = RecordingSummarizer::default();
        let summary = summarize_text(&summarizer, &raw, SummaryLength::Medium).await?;

        assert_eq!(summary, TOO_SHORT_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn test_prompt_and_params_reach_model() -> Result<()> {
        let summarizer = RecordingSummarizer::default();
        let raw = format!("{}\nwith al help", words(30));
        let summary = summarize_text(&summarizer, &raw, SummaryLength::Short).await?;

        assert_eq!(summary, "A tidy summary.");
        let calls = summarizer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (prompt, params) = &calls[0];
        assert_eq!(prompt, &format!("{}{} with AI help", PROMPT_PREFIX, words(30)));
        assert_eq!(params, &SummaryLength::Short.generation_params());
        Ok(())
    }

    #[tokio::test]
    async fn test_model_errors_propagate() {
        let result = summarize_text(&FailingSummarizer, &words(40), SummaryLength::Medium).await;
        assert!(result.unwrap_err().to_string().contains("model unavailable"));
    }

    #[test]
    fn test_build_prompt_clips_long_input() {
        let params = GenerationParams::default();
        let prompt = build_prompt(&words(1000), &params);

        assert_eq!(word_count(&prompt), 512);
        assert!(prompt.starts_with(PROMPT_PREFIX.trim_end()));
    }

    #[test]
    fn test_build_prompt_keeps_short_input_verbatim() {
        let params = GenerationParams::default();
        assert_eq!(build_prompt("a b c", &params), format!("{}a b c", PROMPT_PREFIX));
    }

    #[test]
    fn test_too_short_threshold() {
        assert!(is_too_short(&words(24)));
        assert!(!is_too_short(&words(25)));
    }
}
