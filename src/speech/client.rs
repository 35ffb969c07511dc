use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::info;

use crate::config::SpeechConfig;
use crate::error::PipelineError;

use super::types::{RecognitionAudio, TranscriptSegment, TranscriptionResult};

/// Speech recognition over normalized session audio.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(
        &self,
        audio: RecognitionAudio,
    ) -> Result<TranscriptionResult, PipelineError>;
}

/// Google Speech-to-Text `speech:recognize` client.
///
/// The recognition config is fixed to match the normalizer's output shape;
/// only the language code comes from configuration.
pub struct SpeechClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    language_code: String,
}

impl SpeechClient {
    pub fn new(client: reqwest::Client, config: &SpeechConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language_code: config.language_code.clone(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for SpeechClient {
    async fn recognize(
        &self,
        audio: RecognitionAudio,
    ) -> Result<TranscriptionResult, PipelineError> {
        let url = format!("{}/v1/speech:recognize?key={}", self.api_base, self.api_key);
        let payload = json!({
            "config": {
                "encoding": "LINEAR16",
                "sampleRateHertz": 16000,
                "languageCode": self.language_code,
                "enableAutomaticPunctuation": true,
                "model": "default",
                "useEnhanced": true
            },
            "audio": {
                "content": STANDARD.encode(&audio.content)
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| PipelineError::Transcription {
                message: format!("recognition request failed: {err}"),
            })?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|err| PipelineError::Transcription {
                message: format!("unreadable recognition response: {err}"),
            })?;

        if !status.is_success() {
            return Err(backend_error(status, &body));
        }

        let result = parse_recognition(&body);
        info!(
            segments = result.segments.len(),
            billed_seconds = result.billed_seconds,
            "speech recognized"
        );
        Ok(result)
    }
}

/// Oversized or malformed audio comes back as an invalid-argument rejection
/// and gets its own error so the caller sees an actionable message.
fn backend_error(status: reqwest::StatusCode, body: &Value) -> PipelineError {
    let error = body.get("error");
    let code = error.and_then(|e| e.get("code")).and_then(Value::as_i64);
    let rpc_status = error.and_then(|e| e.get("status")).and_then(Value::as_str);
    if code == Some(3) || rpc_status == Some("INVALID_ARGUMENT") {
        return PipelineError::AudioTooLargeOrInvalid;
    }
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("recognition backend error");
    PipelineError::Transcription {
        message: format!("{status}: {message}"),
    }
}

/// Take the first alternative of each result, in order.
fn parse_recognition(body: &Value) -> TranscriptionResult {
    let segments = body
        .get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|result| {
                    result
                        .get("alternatives")
                        .and_then(Value::as_array)
                        .and_then(|alternatives| alternatives.first())
                        .and_then(|alternative| alternative.get("transcript"))
                        .and_then(Value::as_str)
                        .map(|text| TranscriptSegment { text: text.to_string() })
                })
                .collect()
        })
        .unwrap_or_default();

    TranscriptionResult {
        segments,
        billed_seconds: parse_billed_seconds(
            body.get("totalBilledTime").and_then(Value::as_str),
        ),
    }
}

fn parse_billed_seconds(raw: Option<&str>) -> u64 {
    raw.and_then(|value| {
        let value = value.trim();
        value.strip_suffix('s').unwrap_or(value).parse::<f64>().ok()
    })
    .map(|seconds| seconds.round() as u64)
    .unwrap_or(0)
}
