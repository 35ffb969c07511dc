use std::ffi::OsString;
use std::path::Path;

use tokio::process::Command;
use tracing::{info, warn};

use crate::error::PipelineError;

/// The fixed transcoding recipe: mono, 16 kHz, signed 16-bit PCM WAV with
/// single-pass loudness normalization. Recognition accuracy depends on this
/// exact shape, so the argument list never varies with the input codec.
pub fn ffmpeg_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];
    args.extend(
        [
            "-f", "wav", "-ac", "1", "-ar", "16000", "-acodec", "pcm_s16le", "-b:a", "256k",
            "-af", "loudnorm",
        ]
        .into_iter()
        .map(OsString::from),
    );
    args.push(output.into());
    args
}

/// Transcode `input` to the normalized WAV shape at `output`.
///
/// Pass/fail only: a spawn failure, non-zero exit, or missing/empty output
/// file is a transcode error carrying the tail of ffmpeg's stderr.
pub async fn normalize_to_wav(
    ffmpeg_path: &str,
    input: &Path,
    output: &Path,
) -> Result<(), PipelineError> {
    let result = Command::new(ffmpeg_path)
        .args(ffmpeg_args(input, output))
        .output()
        .await
        .map_err(|err| PipelineError::Transcode {
            message: format!("could not run {ffmpeg_path}: {err}"),
        })?;

    if !result.status.success() {
        return Err(PipelineError::Transcode {
            message: stderr_tail(&result.stderr),
        });
    }

    let output_len = tokio::fs::metadata(output)
        .await
        .map(|meta| meta.len())
        .unwrap_or(0);
    if output_len == 0 {
        return Err(PipelineError::Transcode {
            message: "transcoder produced no output".to_string(),
        });
    }

    // Header sanity read; a malformed header is surfaced downstream by the
    // recognizer, so here it only loses us the duration log line.
    match hound::WavReader::open(output) {
        Ok(reader) => {
            let spec = reader.spec();
            let seconds = reader.duration() as f64 / spec.sample_rate as f64;
            info!(
                seconds = format!("{seconds:.1}"),
                sample_rate = spec.sample_rate,
                channels = spec.channels,
                "audio normalized"
            );
        }
        Err(err) => {
            warn!(error = %err, "normalized output has an unreadable WAV header");
        }
    }

    Ok(())
}

fn stderr_tail(stderr: &[u8]) -> String {
    const TAIL_CHARS: usize = 400;
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    let total = trimmed.chars().count();
    if total <= TAIL_CHARS {
        trimmed.to_string()
    } else {
        trimmed.chars().skip(total - TAIL_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ffmpeg_args_match_recipe() {
        let input = PathBuf::from("/tmp/input_1.aac");
        let output = PathBuf::from("/tmp/output_1.wav");
        let expected: Vec<OsString> = [
            "-y",
            "-i",
            "/tmp/input_1.aac",
            "-f",
            "wav",
            "-ac",
            "1",
            "-ar",
            "16000",
            "-acodec",
            "pcm_s16le",
            "-b:a",
            "256k",
            "-af",
            "loudnorm",
            "/tmp/output_1.wav",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        assert_eq!(ffmpeg_args(&input, &output), expected);
    }

    #[test]
    fn test_stderr_tail_keeps_short_output_whole() {
        assert_eq!(stderr_tail(b"  no such file  \n"), "no such file");
    }

    #[test]
    fn test_stderr_tail_truncates_long_output() {
        let long = "x".repeat(1000);
        let tail = stderr_tail(long.as_bytes());
        assert_eq!(tail.chars().count(), 400);
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_transcode_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.aac");
        let output = dir.path().join("out.wav");
        std::fs::write(&input, b"not audio").unwrap();

        let err = normalize_to_wav("/nonexistent/ffmpeg-binary", &input, &output)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Transcode { .. }));
    }
}
