pub mod audio;
pub mod config;
pub mod docs;
pub mod error;
pub mod generate;
pub mod http;
pub mod pipeline;
pub mod session;
pub mod speech;
pub mod template;

pub use audio::{storage_path_from_url, ObjectStore, ScratchFile, StorageClient};
pub use config::Config;
pub use docs::{ClinicalDocExporter, DocsClient, DocumentService, EmphasisRange};
pub use error::{PipelineError, Result};
pub use generate::{GeminiClient, GeneratedNote, GenerativeModel};
pub use http::{create_router, AppState, IdentityClient, TokenVerifier};
pub use pipeline::{PipelineOutcome, SessionRequest, TranscriptPipeline, TranscriptSource};
pub use session::{FirestoreSessions, SessionStore, SessionUpdate};
pub use speech::{
    RecognitionAudio, SpeechClient, SpeechRecognizer, TranscriptSegment, TranscriptionResult,
};
pub use template::{TemplateVariant, Track, TrackName};
