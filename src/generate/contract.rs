use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// The two-field output contract the generative model must satisfy.
///
/// `formatted_conversation` is the speaker-labelled dialogue;
/// `summary` is the clinical note with generated content substituted in.
/// Anything else in the model output object is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedNote {
    pub formatted_conversation: String,
    pub summary: String,
}

/// Parse raw model output into a [`GeneratedNote`].
///
/// Models routinely wrap JSON answers in a markdown code fence despite being
/// told not to; the fence is stripped first. A response that still fails to
/// parse as an object with both required string fields kills the run, with
/// no retry and no partial acceptance.
pub fn parse_note(raw: &str) -> Result<GeneratedNote, PipelineError> {
    let body = strip_code_fence(raw);
    serde_json::from_str(body).map_err(|err| PipelineError::GenerationContract {
        message: err.to_string(),
    })
}

/// Remove one surrounding markdown code fence, if present.
///
/// Accepts a ```json-tagged fence or a bare ``` fence; any other leading
/// fence tag is left untouched and will fail JSON parsing downstream.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some((info, body)) = rest.split_once('\n') else {
        return trimmed;
    };
    let info = info.trim();
    if !(info.is_empty() || info.eq_ignore_ascii_case("json")) {
        return trimmed;
    }
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}
