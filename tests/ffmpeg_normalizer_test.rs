use askling::application::ports::{AudioNormalizer, NormalizeError};
use askling::infrastructure::audio::FfmpegNormalizer;

fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn build_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let byte_rate = sample_rate * 2;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

fn dir_entry_count(path: &std::path::Path) -> usize {
    std::fs::read_dir(path).unwrap().count()
}

#[tokio::test]
async fn given_native_webm_clip_when_normalizing_then_bytes_pass_through_untouched() {
    let scratch = tempfile::tempdir().unwrap();
    let normalizer = FfmpegNormalizer::with_scratch_root(1, scratch.path().to_path_buf());
    let clip = b"already webm opus";

    let result = normalizer
        .normalize(clip, "audio/webm;codecs=opus")
        .await
        .unwrap();

    assert_eq!(result, clip.to_vec());
    assert_eq!(dir_entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_wav_clip_when_transcoding_then_returns_webm_and_leaves_no_scratch_files() {
    if !ffmpeg_available() {
        return;
    }

    let scratch = tempfile::tempdir().unwrap();
    let normalizer = FfmpegNormalizer::with_scratch_root(1, scratch.path().to_path_buf());
    let wav = build_wav(16_000, &vec![0i16; 16_000]);

    let result = normalizer.normalize(&wav, "audio/wav").await;

    let transcoded = result.unwrap();
    assert!(!transcoded.is_empty());
    // WebM files start with the EBML magic.
    assert_eq!(&transcoded[..4], &[0x1A, 0x45, 0xDF, 0xA3]);
    assert_eq!(dir_entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_corrupt_clip_when_transcoding_then_fails_and_leaves_no_scratch_files() {
    if !ffmpeg_available() {
        return;
    }

    let scratch = tempfile::tempdir().unwrap();
    let normalizer = FfmpegNormalizer::with_scratch_root(1, scratch.path().to_path_buf());

    let result = normalizer.normalize(b"definitely not audio", "audio/mp4").await;

    assert!(matches!(result, Err(NormalizeError::TranscodeFailed(_))));
    assert_eq!(dir_entry_count(scratch.path()), 0);
}
