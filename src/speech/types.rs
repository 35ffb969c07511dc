use serde::{Deserialize, Serialize};

/// Audio payload submitted for recognition. Raw normalized WAV bytes; the
/// transport client handles base64 encoding.
#[derive(Debug, Clone)]
pub struct RecognitionAudio {
    pub content: Vec<u8>,
}

/// One recognized segment, in recognition order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
}

/// Ordered recognition output plus the billed audio duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub segments: Vec<TranscriptSegment>,
    pub billed_seconds: u64,
}

impl TranscriptionResult {
    /// The final transcript: segment texts joined by newline, recognition
    /// order preserved.
    pub fn transcript(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
