use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::DocsConfig;
use crate::error::PipelineError;

use super::emphasis::{EmphasisRange, BODY_START_INDEX};

/// The document operations the exporter needs, in call order.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Create a titled document inside the destination folder; returns its id.
    async fn create_document(&self, title: &str) -> Result<String, PipelineError>;
    async fn insert_text(&self, document_id: &str, text: &str) -> Result<(), PipelineError>;
    async fn bold_ranges(
        &self,
        document_id: &str,
        ranges: &[EmphasisRange],
    ) -> Result<(), PipelineError>;
    async fn share_public(&self, document_id: &str) -> Result<(), PipelineError>;
}

/// Google Docs + Drive client. Docs handles content and styling, Drive
/// handles folder placement and permissions.
pub struct DocsClient {
    client: reqwest::Client,
    docs_api_base: String,
    drive_api_base: String,
    folder_id: String,
    access_token: String,
}

impl DocsClient {
    pub fn new(client: reqwest::Client, config: &DocsConfig) -> Self {
        Self {
            client,
            docs_api_base: config.docs_api_base.trim_end_matches('/').to_string(),
            drive_api_base: config.drive_api_base.trim_end_matches('/').to_string(),
            folder_id: config.folder_id.clone(),
            access_token: config.access_token.clone(),
        }
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<Value, PipelineError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|err| PipelineError::Export {
                message: format!("{what} request failed: {err}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Export {
                message: format!("{what} returned {status}: {body}"),
            });
        }
        response.json().await.map_err(|err| PipelineError::Export {
            message: format!("{what} returned an unreadable body: {err}"),
        })
    }
}

#[async_trait]
impl DocumentService for DocsClient {
    async fn create_document(&self, title: &str) -> Result<String, PipelineError> {
        let url = format!("{}/v1/documents", self.docs_api_base);
        let body = self
            .execute(self.client.post(&url).json(&json!({ "title": title })), "document creation")
            .await?;
        let document_id = body
            .get("documentId")
            .and_then(Value::as_str)
            .ok_or_else(|| PipelineError::Export {
                message: "document creation response had no documentId".to_string(),
            })?
            .to_string();

        // New documents land in the service account's root; file it where the
        // practice keeps its notes.
        let move_url = format!(
            "{}/v3/files/{}?addParents={}&fields=id,parents",
            self.drive_api_base, document_id, self.folder_id
        );
        self.execute(self.client.patch(&move_url).json(&json!({})), "document filing")
            .await?;

        debug!(document_id = %document_id, "document created and filed");
        Ok(document_id)
    }

    async fn insert_text(&self, document_id: &str, text: &str) -> Result<(), PipelineError> {
        let url = format!("{}/v1/documents/{}:batchUpdate", self.docs_api_base, document_id);
        let payload = json!({
            "requests": [{
                "insertText": {
                    "location": { "index": BODY_START_INDEX },
                    "text": text
                }
            }]
        });
        self.execute(self.client.post(&url).json(&payload), "text insertion")
            .await?;
        Ok(())
    }

    async fn bold_ranges(
        &self,
        document_id: &str,
        ranges: &[EmphasisRange],
    ) -> Result<(), PipelineError> {
        if ranges.is_empty() {
            return Ok(());
        }
        let requests: Vec<Value> = ranges
            .iter()
            .map(|range| {
                json!({
                    "updateTextStyle": {
                        "range": { "startIndex": range.start, "endIndex": range.end },
                        "textStyle": { "bold": true },
                        "fields": "bold"
                    }
                })
            })
            .collect();
        let url = format!("{}/v1/documents/{}:batchUpdate", self.docs_api_base, document_id);
        self.execute(
            self.client.post(&url).json(&json!({ "requests": requests })),
            "heading styling",
        )
        .await?;
        Ok(())
    }

    async fn share_public(&self, document_id: &str) -> Result<(), PipelineError> {
        let url = format!("{}/v3/files/{}/permissions", self.drive_api_base, document_id);
        let payload = json!({ "role": "reader", "type": "anyone" });
        self.execute(self.client.post(&url).json(&payload), "permission grant")
            .await?;
        Ok(())
    }
}
