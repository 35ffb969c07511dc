use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::auth::bearer_token;
use super::state::AppState;
use crate::error::PipelineError;
use crate::pipeline::{PipelineOutcome, SessionRequest, TranscriptSource};
use crate::template::{Track, TrackName};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Wire shape of the generate request. Every field is optional so that
/// missing details produce our 400 response instead of a framework
/// deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTranscriptRequest {
    pub session_id: Option<String>,
    pub name: Option<String>,
    pub tracks: Option<Vec<TrackInput>>,

    /// Pre-transcribed session text; skips the audio stages when present.
    pub transcript: Option<String>,

    /// Storage download URL of the session recording.
    pub audio_url: Option<String>,

    pub next_session_plans: Option<String>,
    pub session_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInput {
    pub track_name: Option<String>,
    pub objectives: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct GenerateTranscriptResponse {
    pub success: bool,
    pub transcript: String,
    #[serde(rename = "formattedConversation")]
    pub formatted_conversation: String,
    pub url: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /generateTranscript
/// Run the whole session-to-document pipeline for one session
pub async fn generate_transcript(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<GenerateTranscriptRequest>>,
) -> Response {
    // Bearer auth comes before any body validation.
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let Some(token) = bearer_token(header_value) else {
        return not_authorized(StatusCode::UNAUTHORIZED);
    };
    let uid = match state.verifier.verify(token).await {
        Ok(uid) => uid,
        Err(err) => {
            warn!(error = %err, "token verification failed");
            return not_authorized(StatusCode::FORBIDDEN);
        }
    };
    info!(uid = %uid, "caller authenticated");

    let Some(request) = body.and_then(|Json(body)| validated(body)) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(FailureResponse {
                success: false,
                message: "Missing details in request body".to_string(),
            }),
        )
            .into_response();
    };
    let session_id = request.session_id.clone();
    let timeout_secs = state.pipeline_timeout.as_secs();

    // The run is spawned so that a caller disconnect does not abort external
    // calls already in flight; the timeout only bounds how long we wait.
    let pipeline = state.pipeline.clone();
    let run = tokio::spawn(async move { pipeline.run(&request).await });

    match tokio::time::timeout(state.pipeline_timeout, run).await {
        Ok(Ok(Ok(outcome))) => success(outcome),
        Ok(Ok(Err(err))) => {
            error!(session_id, error = %err, "pipeline failed");
            pipeline_failure(&state, &session_id, err.user_message()).await
        }
        Ok(Err(join_err)) => {
            error!(session_id, error = %join_err, "pipeline task aborted");
            pipeline_failure(
                &state,
                &session_id,
                "Failed to generate transcript: internal pipeline fault".to_string(),
            )
            .await
        }
        Err(_elapsed) => {
            let err = PipelineError::Timeout {
                seconds: timeout_secs,
            };
            error!(session_id, error = %err, "pipeline timed out");
            pipeline_failure(&state, &session_id, err.user_message()).await
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Helpers
// ============================================================================

/// Check required fields and assemble the pipeline request. `None` means the
/// caller gets the 400 missing-details response.
fn validated(body: GenerateTranscriptRequest) -> Option<SessionRequest> {
    let session_id = non_empty(body.session_id)?;
    let name = non_empty(body.name)?;

    let track_inputs = body.tracks?;
    if track_inputs.is_empty() {
        return None;
    }
    let mut tracks = Vec::with_capacity(track_inputs.len());
    for input in track_inputs {
        let label = input.track_name?;
        let objectives = input.objectives?;
        if objectives.is_empty() {
            return None;
        }
        tracks.push(Track {
            name: TrackName::parse(&label),
            objectives,
        });
    }

    // A supplied transcript wins over an audio URL; one of the two must be
    // usable.
    let source = match (non_empty(body.transcript), non_empty(body.audio_url)) {
        (Some(text), _) => TranscriptSource::Provided(text),
        (None, Some(url)) => TranscriptSource::AudioUrl(url),
        (None, None) => return None,
    };

    Some(SessionRequest {
        session_id,
        name,
        tracks,
        source,
        next_session_plans: body.next_session_plans,
        session_notes: body.session_notes,
    })
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

fn success(outcome: PipelineOutcome) -> Response {
    (
        StatusCode::OK,
        Json(GenerateTranscriptResponse {
            success: true,
            transcript: outcome.transcript,
            formatted_conversation: outcome.formatted_conversation,
            url: outcome.doc_url,
            message: "Transcript generated successfully".to_string(),
        }),
    )
        .into_response()
}

fn not_authorized(status: StatusCode) -> Response {
    (
        status,
        Json(FailureResponse {
            success: false,
            message: "Not authorized to access this route".to_string(),
        }),
    )
        .into_response()
}

/// Record the failure on the session (best-effort) and answer the caller.
async fn pipeline_failure(state: &AppState, session_id: &str, message: String) -> Response {
    state.pipeline.report_failure(session_id, &message).await;
    (
        StatusCode::BAD_REQUEST,
        Json(FailureResponse {
            success: false,
            message,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> GenerateTranscriptRequest {
        GenerateTranscriptRequest {
            session_id: Some("abc123".to_string()),
            name: Some("Jane".to_string()),
            tracks: Some(vec![TrackInput {
                track_name: Some("Articulation".to_string()),
                objectives: Some(vec!["improve /s/ in initial position".to_string()]),
            }]),
            transcript: None,
            audio_url: Some("https://host/v0/b/demo/o/rec.aac?alt=media".to_string()),
            next_session_plans: None,
            session_notes: None,
        }
    }

    #[test]
    fn test_validated_accepts_audio_url_request() {
        let request = validated(full_body()).unwrap();
        assert_eq!(request.session_id, "abc123");
        assert!(matches!(request.source, TranscriptSource::AudioUrl(_)));
        assert_eq!(request.tracks[0].name, TrackName::Articulation);
    }

    #[test]
    fn test_validated_prefers_supplied_transcript() {
        let mut body = full_body();
        body.transcript = Some("Therapist: hello".to_string());
        let request = validated(body).unwrap();
        assert!(matches!(request.source, TranscriptSource::Provided(_)));
    }

    #[test]
    fn test_validated_rejects_missing_fields() {
        let mut body = full_body();
        body.session_id = None;
        assert!(validated(body).is_none());

        let mut body = full_body();
        body.name = Some("   ".to_string());
        assert!(validated(body).is_none());

        let mut body = full_body();
        body.transcript = None;
        body.audio_url = None;
        assert!(validated(body).is_none());
    }

    #[test]
    fn test_validated_rejects_empty_tracks() {
        let mut body = full_body();
        body.tracks = Some(vec![]);
        assert!(validated(body).is_none());

        let mut body = full_body();
        body.tracks = Some(vec![TrackInput {
            track_name: Some("Language".to_string()),
            objectives: Some(vec![]),
        }]);
        assert!(validated(body).is_none());
    }

    #[test]
    fn test_unknown_track_name_falls_back_to_general() {
        let mut body = full_body();
        body.tracks = Some(vec![TrackInput {
            track_name: Some("Pragmatics".to_string()),
            objectives: Some(vec!["conversational repair".to_string()]),
        }]);
        let request = validated(body).unwrap();
        assert_eq!(request.tracks[0].name, TrackName::General);
    }
}
