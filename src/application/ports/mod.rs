mod audio_normalizer;
mod chat_model;
mod speech_synthesizer;
mod transcriber;

pub use audio_normalizer::{AudioNormalizer, NormalizeError};
pub use chat_model::{ChatMessage, ChatModel, ChatModelError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcriber::{Transcriber, TranscriptionError};
