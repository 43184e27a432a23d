pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{
    OpenAiSettings, ServerSettings, Settings, SettingsError, TranscodeSettings, TtsSettings,
};
pub use router::create_router;
pub use state::AppState;
