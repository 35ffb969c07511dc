//! The transcript-to-document pipeline.
//!
//! One inbound request runs one sequential chain: acquire audio, normalize,
//! recognize, resolve the note template, generate, export, persist. There is
//! no fan-out and no retry; the first failing stage aborts the rest.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::audio::{normalize_to_wav, storage_path_from_url, ObjectStore, ScratchFile};
use crate::docs::{ClinicalDocExporter, DocumentService};
use crate::error::PipelineError;
use crate::generate::{build_prompt, parse_note, GenerativeModel};
use crate::session::{SessionStore, SessionUpdate};
use crate::speech::{RecognitionAudio, SpeechRecognizer};
use crate::template::{self, Track};

/// Where the session transcript comes from: either the caller already has
/// one, or we derive it from a recorded audio object.
#[derive(Debug, Clone)]
pub enum TranscriptSource {
    Provided(String),
    AudioUrl(String),
}

/// Everything the pipeline needs for one invocation.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub session_id: String,
    pub name: String,
    pub tracks: Vec<Track>,
    pub source: TranscriptSource,
    pub next_session_plans: Option<String>,
    pub session_notes: Option<String>,
}

/// What a successful run hands back to the HTTP layer.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub transcript: String,
    pub formatted_conversation: String,
    pub doc_url: String,
}

/// The orchestrator. Collaborators are injected once at startup and shared
/// across invocations; the pipeline itself keeps no per-run state.
pub struct TranscriptPipeline {
    store: Arc<dyn ObjectStore>,
    recognizer: Arc<dyn SpeechRecognizer>,
    model: Arc<dyn GenerativeModel>,
    exporter: ClinicalDocExporter,
    sessions: Arc<dyn SessionStore>,
    scratch_dir: PathBuf,
    ffmpeg_path: String,
}

impl TranscriptPipeline {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        recognizer: Arc<dyn SpeechRecognizer>,
        model: Arc<dyn GenerativeModel>,
        documents: Arc<dyn DocumentService>,
        sessions: Arc<dyn SessionStore>,
        scratch_dir: PathBuf,
        ffmpeg_path: String,
    ) -> Self {
        Self {
            store,
            recognizer,
            model,
            exporter: ClinicalDocExporter::new(documents),
            sessions,
            scratch_dir,
            ffmpeg_path,
        }
    }

    /// Run the full chain for one session. The success-path session update is
    /// part of the run; failure capture is the caller's call to
    /// [`TranscriptPipeline::report_failure`].
    pub async fn run(&self, request: &SessionRequest) -> Result<PipelineOutcome, PipelineError> {
        let run_id = Uuid::new_v4();
        info!(session_id = %request.session_id, run_id = %run_id, "pipeline started");

        let (transcript, billed_seconds) = match &request.source {
            TranscriptSource::Provided(text) => {
                info!(run_id = %run_id, "caller supplied a transcript, skipping audio stages");
                (text.clone(), 0)
            }
            TranscriptSource::AudioUrl(url) => self.transcribe_recording(url).await?,
        };

        let resolved = template::resolve(
            &request.name,
            &request.tracks,
            request.next_session_plans.as_deref(),
            request.session_notes.as_deref(),
        );

        let prompt = build_prompt(&resolved, &transcript);
        let raw_response = self.model.generate(&prompt).await?;
        let note = parse_note(&raw_response)?;

        let doc_url = self.exporter.export(&note.summary).await?;

        self.sessions
            .update(
                &request.session_id,
                &SessionUpdate::Succeeded {
                    transcript: transcript.clone(),
                    formatted_conversation: note.formatted_conversation.clone(),
                    summary: note.summary,
                    doc_url: doc_url.clone(),
                    billed_seconds,
                },
            )
            .await?;

        info!(session_id = %request.session_id, run_id = %run_id, "pipeline finished");
        Ok(PipelineOutcome {
            transcript,
            formatted_conversation: note.formatted_conversation,
            doc_url,
        })
    }

    /// Record a pipeline failure on the session. Best-effort: a store error
    /// here is logged and swallowed so it can never mask the original error.
    pub async fn report_failure(&self, session_id: &str, message: &str) {
        let update = SessionUpdate::Failed {
            message: message.to_string(),
        };
        if let Err(err) = self.sessions.update(session_id, &update).await {
            error!(session_id, error = %err, "could not record pipeline failure");
        }
    }

    /// Audio half of the chain: fetch the object, normalize it, recognize it.
    /// Scratch files live exactly as long as this call, every exit path.
    async fn transcribe_recording(&self, url: &str) -> Result<(String, u64), PipelineError> {
        let object_path = storage_path_from_url(url)?;
        let bytes = self.store.fetch(&object_path).await?;

        let input = ScratchFile::reserve(&self.scratch_dir, "input", "aac");
        tokio::fs::write(input.path(), &bytes).await?;

        let output = ScratchFile::reserve(&self.scratch_dir, "output", "wav");
        normalize_to_wav(&self.ffmpeg_path, input.path(), output.path()).await?;

        let content = tokio::fs::read(output.path()).await?;
        let result = self.recognizer.recognize(RecognitionAudio { content }).await?;
        Ok((result.transcript(), result.billed_seconds))
    }
}
