mod dialogue_turn;
mod voice;

pub use dialogue_turn::{DialogueTurn, HistoryError, parse_history};
pub use voice::{VoiceName, VoiceTable};
