use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryLength::Short => write!(f, "short"),
            SummaryLength::Medium => write!(f, "medium"),
            SummaryLength::Long => write!(f, "long"),
        }
    }
}

// Unknown labels fall back to medium.
impl From<&str> for SummaryLength {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "short" => SummaryLength::Short,
            "long" => SummaryLength::Long,
            _ => SummaryLength::Medium,
        }
    }
}

impl From<String> for SummaryLength {
    fn from(s: String) -> Self {
        SummaryLength::from(s.as_str())
    }
}

impl SummaryLength {
    /// `(min, max)` output length in tokens.
    pub fn token_bounds(&self) -> (u32, u32) {
        match self {
            SummaryLength::Short => (20, 60),
            SummaryLength::Medium => (40, 120),
            SummaryLength::Long => (80, 180),
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        let (min_length, max_length) = self.token_bounds();
        GenerationParams {
            min_length,
            max_length,
            ..GenerationParams::default()
        }
    }
}

/// Decoding settings forwarded to the model's generate routine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub min_length: u32,
    pub max_length: u32,
    pub num_beams: u32,
    pub length_penalty: f64,
    pub no_repeat_ngram_size: u32,
    pub early_stopping: bool,
    #[serde(skip, default = "default_max_input_tokens")]
    pub max_input_tokens: usize,
}

fn default_max_input_tokens() -> usize {
    512
}

impl Default for GenerationParams {
    fn default() -> Self {
        let (min_length, max_length) = SummaryLength::Medium.token_bounds();
        Self {
            min_length,
            max_length,
            num_beams: 6,
            length_penalty: 2.2,
            no_repeat_ngram_size: 3,
            early_stopping: true,
            max_input_tokens: default_max_input_tokens(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SummarizerConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl SummarizerConfig {
    pub fn new(url: Option<String>, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            url,
            api_key,
            model,
            timeout_secs: None,
        }
    }

    /// Reads `BRIEFLY_SUMMARIZER_URL`, `BRIEFLY_API_KEY`, `BRIEFLY_MODEL` and
    /// `BRIEFLY_TIMEOUT_SECS`; unset or empty variables stay `None`.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            url: var("BRIEFLY_SUMMARIZER_URL"),
            api_key: var("BRIEFLY_API_KEY"),
            model: var("BRIEFLY_MODEL"),
            timeout_secs: var("BRIEFLY_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
        }
    }

    pub fn get_default_model() -> &'static str {
        "t5-small"
    }

    pub fn get_default_timeout_secs() -> u64 {
        120
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(Self::get_default_model())
    }

    /// Explicit URL, or the hosted inference endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        match self.url.as_deref() {
            Some(url) => url.to_string(),
            None => format!("https://api-inference.huggingface.co/models/{}", self.model()),
        }
    }
}
