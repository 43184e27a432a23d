use async_trait::async_trait;

use crate::domain::VoiceName;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Request linear-PCM audio for `text` in the given voice. Returns raw
    /// encoded bytes; transport encoding is the caller's concern.
    async fn synthesize(&self, text: &str, voice: &VoiceName) -> Result<Vec<u8>, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
