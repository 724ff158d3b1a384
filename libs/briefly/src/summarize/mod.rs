mod types;
pub use types::{GenerationParams, SummarizerConfig, SummaryLength};

mod utils;
pub use utils::{build_prompt, is_too_short, summarize_text, MIN_SUMMARY_WORDS, PROMPT_PREFIX, TOO_SHORT_MESSAGE};

mod api_call;
pub use api_call::HttpSummarizer;

use anyhow::Result;
use std::future::Future;

/// Seam to the external seq2seq model. `generate` receives the full prompt and
/// the decoding parameters and returns the decoded text.
pub trait Summarizer: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> impl Future<Output = Result<String>> + Send;
}
