pub mod client;
pub mod types;

pub use client::{SpeechClient, SpeechRecognizer};
pub use types::{RecognitionAudio, TranscriptSegment, TranscriptionResult};
