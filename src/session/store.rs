use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::config::SessionsConfig;
use crate::error::PipelineError;

use super::record::SessionUpdate;

/// Write access to session records, keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn update(&self, session_id: &str, update: &SessionUpdate)
        -> Result<(), PipelineError>;
}

/// Firestore-backed session store.
///
/// Updates are single PATCH calls with an explicit field mask, so a failure
/// write can never clobber content fields from an earlier success.
pub struct FirestoreSessions {
    client: reqwest::Client,
    api_base: String,
    project_id: String,
    collection: String,
    access_token: String,
}

impl FirestoreSessions {
    pub fn new(client: reqwest::Client, config: &SessionsConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            collection: config.collection.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl SessionStore for FirestoreSessions {
    async fn update(
        &self,
        session_id: &str,
        update: &SessionUpdate,
    ) -> Result<(), PipelineError> {
        let (mask, fields) = update_fields(update);
        let url = format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}/{}",
            self.api_base,
            self.project_id,
            self.collection,
            urlencoding::encode(session_id)
        );
        let query: Vec<(&str, &str)> = mask
            .iter()
            .map(|field| ("updateMask.fieldPaths", *field))
            .collect();

        let response = self
            .client
            .patch(&url)
            .query(&query)
            .bearer_auth(&self.access_token)
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .map_err(|err| PipelineError::Persistence {
                message: format!("session update request failed: {err}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Persistence {
                message: format!("session store returned {status}: {body}"),
            });
        }

        info!(session_id, fields = mask.len(), "session record updated");
        Ok(())
    }
}

/// Field mask and typed Firestore values for an update. Integer values are
/// strings on the wire, per the Firestore REST value encoding.
fn update_fields(update: &SessionUpdate) -> (Vec<&'static str>, Value) {
    match update {
        SessionUpdate::Succeeded {
            transcript,
            formatted_conversation,
            summary,
            doc_url,
            billed_seconds,
        } => (
            vec![
                "transcript",
                "formattedConversation",
                "summary",
                "docUrl",
                "billedDuration",
                "error",
                "errorMessage",
            ],
            json!({
                "transcript": { "stringValue": transcript },
                "formattedConversation": { "stringValue": formatted_conversation },
                "summary": { "stringValue": summary },
                "docUrl": { "stringValue": doc_url },
                "billedDuration": { "integerValue": billed_seconds.to_string() },
                "error": { "booleanValue": false },
                "errorMessage": { "stringValue": "" }
            }),
        ),
        SessionUpdate::Failed { message } => (
            vec!["error", "errorMessage"],
            json!({
                "error": { "booleanValue": true },
                "errorMessage": { "stringValue": message }
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_mask_covers_content_and_clears_error() {
        let update = SessionUpdate::Succeeded {
            transcript: "t".to_string(),
            formatted_conversation: "f".to_string(),
            summary: "s".to_string(),
            doc_url: "https://docs.google.com/document/d/x/edit".to_string(),
            billed_seconds: 45,
        };
        let (mask, fields) = update_fields(&update);
        assert!(mask.contains(&"transcript"));
        assert!(mask.contains(&"docUrl"));
        assert!(mask.contains(&"errorMessage"));
        assert_eq!(fields["error"]["booleanValue"], json!(false));
        assert_eq!(fields["billedDuration"]["integerValue"], json!("45"));
        assert_eq!(fields["errorMessage"]["stringValue"], json!(""));
    }

    #[test]
    fn test_failure_mask_excludes_content_fields() {
        let update = SessionUpdate::Failed {
            message: "Failed to generate transcript: boom".to_string(),
        };
        let (mask, fields) = update_fields(&update);
        assert_eq!(mask, vec!["error", "errorMessage"]);
        assert_eq!(fields["error"]["booleanValue"], json!(true));
        assert!(fields.get("transcript").is_none());
        assert!(fields.get("summary").is_none());
    }
}
