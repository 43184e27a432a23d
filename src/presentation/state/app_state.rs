use std::sync::Arc;

use crate::application::ports::{AudioNormalizer, ChatModel, SpeechSynthesizer, Transcriber};
use crate::application::services::AskService;
use crate::presentation::config::Settings;

pub struct AppState<N, T, C, S>
where
    N: AudioNormalizer,
    T: Transcriber,
    C: ChatModel,
    S: SpeechSynthesizer,
{
    pub ask_service: Arc<AskService<N, T, C, S>>,
    pub settings: Settings,
}

impl<N, T, C, S> Clone for AppState<N, T, C, S>
where
    N: AudioNormalizer,
    T: Transcriber,
    C: ChatModel,
    S: SpeechSynthesizer,
{
    fn clone(&self) -> Self {
        Self {
            ask_service: Arc::clone(&self.ask_service),
            settings: self.settings.clone(),
        }
    }
}
