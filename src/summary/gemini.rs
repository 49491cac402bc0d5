//! Gemini summarizer.

use super::SummaryError;
use crate::config::SummarySettings;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Returned when the upstream response does not carry a candidate text.
pub const FALLBACK_SUMMARY: &str = "Failed to generate summary.";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Issues one `generateContent` request per summary. No retries.
pub struct GeminiSummarizer {
    client: reqwest::Client,
    settings: SummarySettings,
    api_key: Option<String>,
}

impl GeminiSummarizer {
    /// Create a summarizer. The API key is resolved once, here.
    pub fn new(settings: SummarySettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        let api_key = settings.resolved_api_key();

        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn summarize(&self, text: &str) -> std::result::Result<String, SummaryError> {
        if text.trim().is_empty() {
            return Err(SummaryError::InvalidInput);
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SummaryError::UpstreamFailure("API key not configured".to_string()))?;

        let prompt = self.settings.render_prompt(text);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        debug!("Sending request to Gemini model {}", self.settings.model);

        let response = self
            .client
            .post(self.url())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SummaryError::UpstreamFailure(e.without_url().to_string()))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SummaryError::UpstreamFailure(e.without_url().to_string()))?;

        let summary = extract_summary(&payload);
        info!("Generated summary ({} chars)", summary.len());
        Ok(summary)
    }
}

/// Read `candidates[0].content.parts[0].text`, or the fallback string.
pub fn extract_summary(payload: &Value) -> String {
    payload
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .unwrap_or(FALLBACK_SUMMARY)
        .to_string()
}
