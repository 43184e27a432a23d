use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ChatMessage, ChatModel, ChatModelError};

pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatModelError> {
        let url = format!("{}/chat/completions", self.base_url);

        // Sampling is pinned to zero so identical inputs get stable answers.
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: 0.0,
        };

        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            "Sending messages to chat completion API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatModelError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ChatModelError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatModelError::ApiRequestFailed(format!("parse response: {}", e)))?;

        let answer = result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatModelError::InvalidResponse("no choices in completion".to_string()))?;

        tracing::info!(chars = answer.len(), "Chat completion received");

        Ok(answer)
    }
}
