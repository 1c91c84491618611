//! Gemini API client module
//!
//! Sends single-turn `generateContent` requests and returns the generated text.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::errors::BotError;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// A single-turn text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, BotError>;
}

/// Gemini API client for generating summaries
pub struct GeminiClient {
    http: Client,
    api_key: String,
    api_base: String,
    model_name: String,
}

impl GeminiClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            api_key: config.gemini_api_key.clone(),
            api_base: config.gemini_api_base.clone(),
            model_name: config.gemini_model.clone(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base, self.model_name
        )
    }
}

#[must_use]
pub fn build_generate_request(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ]
    })
}

/// Pull the generated text out of a `generateContent` response.
///
/// # Errors
///
/// Returns `BotError::GeminiError` when there is no candidate text, naming the
/// block reason if the prompt was filtered.
pub fn extract_response_text(response_json: &Value) -> Result<String, BotError> {
    let parts = response_json
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array);

    let text: String = parts
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }

    if let Some(reason) = response_json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(Value::as_str)
    {
        return Err(BotError::GeminiError(format!(
            "Prompt blocked by safety filter: {reason}"
        )));
    }

    let finish_reason = response_json
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("finishReason"))
        .and_then(Value::as_str);

    Err(BotError::GeminiError(match finish_reason {
        Some(reason) => format!("No text in response (finishReason: {reason})"),
        None => "No text in response".to_string(),
    }))
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        #[cfg(feature = "debug-logs")]
        debug!("Using Gemini prompt:\n{}", prompt);

        info!(
            model = %self.model_name,
            estimated_input_tokens = estimate_tokens(prompt),
            "Requesting Gemini completion"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_generate_request(prompt))
            .send()
            .await
            .map_err(|e| BotError::HttpError(format!("Gemini API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(BotError::GeminiError(format!(
                "Gemini API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| BotError::GeminiError(format!("Failed to parse Gemini response: {e}")))?;

        let text = extract_response_text(&response_json)?;
        debug!(output_chars = text.chars().count(), "Gemini completion received");
        Ok(text)
    }
}
