use std::sync::Arc;
use std::time::Duration;

use super::auth::TokenVerifier;
use crate::pipeline::TranscriptPipeline;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TranscriptPipeline>,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Upper bound on one whole pipeline run.
    pub pipeline_timeout: Duration,
}

impl AppState {
    pub fn new(
        pipeline: Arc<TranscriptPipeline>,
        verifier: Arc<dyn TokenVerifier>,
        pipeline_timeout: Duration,
    ) -> Self {
        Self {
            pipeline,
            verifier,
            pipeline_timeout,
        }
    }
}
