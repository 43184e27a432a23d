use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::application::ports::{SpeechSynthesizer, SynthesisError};
use crate::domain::VoiceName;

pub struct GoogleTtsClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GoogleTtsClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig<'a>,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: String,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    async fn synthesize(&self, text: &str, voice: &VoiceName) -> Result<Vec<u8>, SynthesisError> {
        let url = format!("{}/v1/text:synthesize", self.base_url);

        let request = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: voice.language_code(),
                name: voice.as_str(),
            },
            audio_config: AudioConfig {
                audio_encoding: "LINEAR16",
            },
        };

        tracing::debug!(voice = %voice, chars = text.len(), "Sending text to synthesis API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("parse response: {}", e)))?;

        // The service base64-encodes its payload; the port contract is raw
        // audio bytes.
        let audio = general_purpose::STANDARD
            .decode(result.audio_content)
            .map_err(|e| SynthesisError::InvalidResponse(format!("audio content: {}", e)))?;

        tracing::info!(bytes = audio.len(), "Speech synthesis completed");

        Ok(audio)
    }
}
