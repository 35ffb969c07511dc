//! Error types for the transcript-to-document pipeline.

use thiserror::Error;

/// Everything that can abort a pipeline run, one variant per stage failure
/// class. Stage errors never carry upstream stack detail; the message is the
/// summary a caller is allowed to see.
#[derive(Error, Debug)]
pub enum PipelineError {
    // Audio acquisition errors
    #[error("Invalid storage URL format")]
    InvalidSourceFormat,

    #[error("Storage download failed: {message}")]
    Storage { message: String },

    // Audio normalization errors
    #[error("Audio conversion failed: {message}")]
    Transcode { message: String },

    // Speech recognition errors
    #[error("Audio file is too large or invalid format")]
    AudioTooLargeOrInvalid,

    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    // Note generation errors
    #[error("Note generation failed: {message}")]
    Model { message: String },

    #[error("Generated note violated the output contract: {message}")]
    GenerationContract { message: String },

    // Document export errors
    #[error("Document export failed: {message}")]
    Export { message: String },

    // Session persistence errors
    #[error("Session update failed: {message}")]
    Persistence { message: String },

    #[error("Pipeline timed out after {seconds}s")]
    Timeout { seconds: u64 },

    // Scratch file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// The message returned to the HTTP caller. The oversized-audio case is
    /// surfaced verbatim; everything else gets the generic failure prefix.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::AudioTooLargeOrInvalid => self.to_string(),
            other => format!("Failed to generate transcript: {}", other),
        }
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_source_format_display() {
        assert_eq!(
            PipelineError::InvalidSourceFormat.to_string(),
            "Invalid storage URL format"
        );
    }

    #[test]
    fn test_transcode_display() {
        let error = PipelineError::Transcode {
            message: "ffmpeg exited with status 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Audio conversion failed: ffmpeg exited with status 1"
        );
    }

    #[test]
    fn test_audio_too_large_user_message_is_verbatim() {
        assert_eq!(
            PipelineError::AudioTooLargeOrInvalid.user_message(),
            "Audio file is too large or invalid format"
        );
    }

    #[test]
    fn test_other_user_messages_are_prefixed() {
        let error = PipelineError::Transcription {
            message: "backend unavailable".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "Failed to generate transcript: Transcription failed: backend unavailable"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: PipelineError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<PipelineError>();
        assert_sync::<PipelineError>();
    }
}
