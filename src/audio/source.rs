use async_trait::async_trait;
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::PipelineError;

/// Extract the object path from a storage download URL.
///
/// The URL must carry the `/o/` object marker; the path is the
/// percent-encoded segment between the marker and the query string.
pub fn storage_path_from_url(url: &str) -> Result<String, PipelineError> {
    let (_, after_marker) = url
        .split_once("/o/")
        .ok_or(PipelineError::InvalidSourceFormat)?;
    let encoded = after_marker.split('?').next().unwrap_or("");
    if encoded.is_empty() {
        return Err(PipelineError::InvalidSourceFormat);
    }
    let decoded =
        urlencoding::decode(encoded).map_err(|_| PipelineError::InvalidSourceFormat)?;
    Ok(decoded.into_owned())
}

/// Read access to the recording bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn fetch(&self, object_path: &str) -> Result<Vec<u8>, PipelineError>;
}

/// Firebase Storage media download client.
pub struct StorageClient {
    client: reqwest::Client,
    api_base: String,
    bucket: String,
    access_token: String,
}

impl StorageClient {
    pub fn new(client: reqwest::Client, config: &StorageConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn fetch(&self, object_path: &str) -> Result<Vec<u8>, PipelineError> {
        let url = format!(
            "{}/v0/b/{}/o/{}?alt=media",
            self.api_base,
            self.bucket,
            urlencoding::encode(object_path)
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|err| PipelineError::Storage {
                message: format!("download request failed: {err}"),
            })?;

        if !response.status().is_success() {
            return Err(PipelineError::Storage {
                message: format!("bucket returned {} for {object_path}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|err| PipelineError::Storage {
            message: format!("download interrupted: {err}"),
        })?;
        debug!(object = object_path, bytes = bytes.len(), "object fetched");
        Ok(bytes.to_vec())
    }
}
