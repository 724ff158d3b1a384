use std::time::Duration;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::{GenerationParams, Summarizer, SummarizerConfig};

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

// Summarization pipelines answer with `summary_text`, text2text ones with `generated_text`.
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Outputs(Vec<GeneratedOutput>),
    Error { error: String },
}

#[derive(Deserialize)]
struct GeneratedOutput {
    #[serde(alias = "generated_text")]
    summary_text: String,
}

/// Calls a hosted seq2seq model over HTTP (Hugging Face inference API format).
#[derive(Clone, Debug)]
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let timeout = config
            .timeout_secs
            .unwrap_or(SummarizerConfig::get_default_timeout_secs());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Uses a preconfigured client, e.g. one with custom proxy or TLS settings.
    pub fn with_client(client: reqwest::Client, config: &SummarizerConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| anyhow::anyhow!("API key contains invalid header characters"))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

impl Summarizer for HttpSummarizer {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: params,
            options: InferenceOptions { wait_for_model: true },
        };

        log::debug!("POST {} ({} prompt chars)", self.endpoint, prompt.len());
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to reach summarization model: {}", e))?;

        let status = response.status();
        let response_text = response.text().await?;

        let parsed = serde_json::from_str::<InferenceResponse>(&response_text).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse model response ({}): {}. Raw response: {}",
                status,
                e,
                response_text
            )
        })?;

        match parsed {
            InferenceResponse::Error { error } => {
                anyhow::bail!("Summarization model returned an error ({}): {}", status, error)
            }
            InferenceResponse::Outputs(_) if !status.is_success() => {
                anyhow::bail!("Summarization model returned status {}", status)
            }
            InferenceResponse::Outputs(outputs) => outputs
                .into_iter()
                .next()
                .map(|output| output.summary_text)
                .ok_or_else(|| anyhow::anyhow!("No content in model response")),
        }
    }
}
