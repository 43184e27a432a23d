use async_trait::async_trait;
use serde::Serialize;

/// One message in the sequence submitted to the chat-completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Submit the message sequence and return the first completion's text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ChatModelError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
