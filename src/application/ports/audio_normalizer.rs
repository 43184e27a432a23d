use async_trait::async_trait;

#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    /// Produce bytes in the codec the transcriber accepts. Clips already in
    /// that codec pass through unchanged.
    async fn normalize(&self, clip: &[u8], media_type: &str) -> Result<Vec<u8>, NormalizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("transcoding failed: {0}")]
    TranscodeFailed(String),
    #[error("temporary storage: {0}")]
    Io(#[from] std::io::Error),
}
