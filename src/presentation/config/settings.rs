use std::str::FromStr;

use crate::domain::VoiceTable;

/// Process-wide configuration, read once from the environment at startup and
/// passed by reference into each component.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub tts: TtsSettings,
    pub transcode: TranscodeSettings,
    pub voices: VoiceTable,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Single allowed CORS origin; unset means allow-all.
    pub cors_allow_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub whisper_model: String,
}

#[derive(Debug, Clone)]
pub struct TtsSettings {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct TranscodeSettings {
    pub max_concurrent: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: parse_env("SERVER_PORT", 8000)?,
                cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN").ok(),
            },
            openai: OpenAiSettings {
                api_key: require("OPENAI_API_KEY")?,
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                chat_model: env_or("CHAT_MODEL", "gpt-3.5-turbo"),
                whisper_model: env_or("WHISPER_MODEL", "whisper-1"),
            },
            tts: TtsSettings {
                api_key: require("GOOGLE_TTS_API_KEY")?,
                base_url: env_or("GOOGLE_TTS_BASE_URL", "https://texttospeech.googleapis.com"),
            },
            transcode: TranscodeSettings {
                max_concurrent: parse_env("MAX_CONCURRENT_TRANSCODES", 2)?,
            },
            voices: VoiceTable::default(),
        })
    }
}

fn require(key: &str) -> Result<String, SettingsError> {
    std::env::var(key).map_err(|_| SettingsError::Missing(key.to_string()))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, SettingsError> {
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| SettingsError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    Missing(String),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}
