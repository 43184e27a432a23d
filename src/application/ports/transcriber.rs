use async_trait::async_trait;

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Submit audio plus a language hint to the speech-to-text service and
    /// return the recognized text.
    async fn transcribe(&self, audio: &[u8], language: &str) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
