use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::application::ports::{AudioNormalizer, NormalizeError};

/// Media types the transcription service accepts without re-encoding.
const NATIVE_MEDIA_TYPE_PREFIX: &str = "audio/webm";

/// Normalizes uploaded clips to WebM/Opus via the external `ffmpeg` binary.
///
/// Transcoding is the one heavyweight stage of the pipeline, so concurrent
/// invocations are bounded by a semaphore. Scratch files live in a per-call
/// temporary directory that is reclaimed on every exit path.
pub struct FfmpegNormalizer {
    ffmpeg_binary: String,
    scratch_root: PathBuf,
    transcode_slots: Semaphore,
}

impl FfmpegNormalizer {
    pub fn new(max_concurrent_transcodes: usize) -> Self {
        Self::with_scratch_root(max_concurrent_transcodes, std::env::temp_dir())
    }

    /// Per-call temporary directories are created under `root`.
    pub fn with_scratch_root(max_concurrent_transcodes: usize, root: PathBuf) -> Self {
        Self {
            ffmpeg_binary: "ffmpeg".to_string(),
            scratch_root: root,
            transcode_slots: Semaphore::new(max_concurrent_transcodes),
        }
    }
}

#[async_trait]
impl AudioNormalizer for FfmpegNormalizer {
    async fn normalize(&self, clip: &[u8], media_type: &str) -> Result<Vec<u8>, NormalizeError> {
        if media_type.starts_with(NATIVE_MEDIA_TYPE_PREFIX) {
            return Ok(clip.to_vec());
        }

        let _permit = self
            .transcode_slots
            .acquire()
            .await
            .map_err(|e| NormalizeError::TranscodeFailed(format!("transcode slot: {}", e)))?;

        // Dropping the TempDir reclaims the scratch space whether the
        // transcode succeeds or fails.
        let workdir = tempfile::tempdir_in(&self.scratch_root)?;
        let input_path = workdir.path().join("input");
        let output_path = workdir.path().join("audio.webm");

        tokio::fs::write(&input_path, clip).await?;

        tracing::debug!(
            media_type = %media_type,
            bytes = clip.len(),
            "Transcoding clip to WebM/Opus"
        );

        let output = Command::new(&self.ffmpeg_binary)
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(&input_path)
            .arg("-lossless")
            .arg("1")
            .arg("-c:v")
            .arg("libvpx-vp9")
            .arg("-c:a")
            .arg("libopus")
            .arg("-crf")
            .arg("30")
            .arg("-b:v")
            .arg("0")
            .arg("-b:a")
            .arg("192k")
            .arg(&output_path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NormalizeError::TranscodeFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let transcoded = tokio::fs::read(&output_path).await?;

        tracing::info!(
            input_bytes = clip.len(),
            output_bytes = transcoded.len(),
            "Transcoding completed"
        );

        Ok(transcoded)
    }
}
