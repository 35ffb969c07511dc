use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::error::PipelineError;

use super::client::DocumentService;
use super::emphasis::heading_ranges;

/// Publishes a finished clinical note as a shareable document.
pub struct ClinicalDocExporter {
    service: Arc<dyn DocumentService>,
}

impl ClinicalDocExporter {
    pub fn new(service: Arc<dyn DocumentService>) -> Self {
        Self { service }
    }

    /// Create, fill, style, and share one document; returns its link.
    ///
    /// The emphasis pass runs once, on the plain note text, before any
    /// styling call. On failure the created document is left in place; only
    /// the pipeline outcome records the error.
    pub async fn export(&self, note_text: &str) -> Result<String, PipelineError> {
        let title = format!("Clinical Notes - {}", Local::now().format("%Y-%m-%d %H:%M"));
        let document_id = self.service.create_document(&title).await?;

        self.service.insert_text(&document_id, note_text).await?;

        let ranges = heading_ranges(note_text);
        self.service.bold_ranges(&document_id, &ranges).await?;
        self.service.share_public(&document_id).await?;

        let url = document_url(&document_id);
        info!(document_id = %document_id, headings = ranges.len(), "note exported");
        Ok(url)
    }
}

/// The durable shareable link for a document id.
pub fn document_url(document_id: &str) -> String {
    format!("https://docs.google.com/document/d/{document_id}/edit")
}
