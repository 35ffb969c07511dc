use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::PipelineError;

/// A text-in, text-out generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError>;
}

/// Gemini `generateContent` client.
///
/// Sampling parameters are fixed low-temperature values tuned for faithful
/// form filling rather than creative output.
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, config: &GenerationConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": 0.3,
                "topP": 0.8,
                "topK": 40,
                "maxOutputTokens": 8192
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| PipelineError::Model {
                message: format!("generation request failed: {err}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Model {
                message: format!("generation backend returned {status}: {body}"),
            });
        }

        let body: Value = response.json().await.map_err(|err| PipelineError::Model {
            message: format!("unreadable generation response: {err}"),
        })?;

        let text = first_candidate_text(&body);
        if text.is_empty() {
            return Err(PipelineError::Model {
                message: "generation response contained no text".to_string(),
            });
        }
        debug!(chars = text.len(), "model response received");
        Ok(text)
    }
}

/// Concatenate every text part of the first candidate.
fn first_candidate_text(body: &Value) -> String {
    let mut out = String::new();
    if let Some(parts) = body
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
    {
        for part in parts {
            if let Some(text) = part.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_text_concatenates_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] }
            }]
        });
        assert_eq!(first_candidate_text(&body), "{\"a\":1}");
    }

    #[test]
    fn test_first_candidate_text_ignores_later_candidates() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "kept" }] } },
                { "content": { "parts": [{ "text": "dropped" }] } }
            ]
        });
        assert_eq!(first_candidate_text(&body), "kept");
    }

    #[test]
    fn test_first_candidate_text_handles_empty_response() {
        assert_eq!(first_candidate_text(&json!({})), "");
        assert_eq!(first_candidate_text(&json!({ "candidates": [] })), "");
    }
}
