mod settings;

pub use settings::{
    OpenAiSettings, ServerSettings, Settings, SettingsError, TranscodeSettings, TtsSettings,
};
