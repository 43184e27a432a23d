use std::sync::Arc;

use crate::application::ports::{
    AudioNormalizer, ChatMessage, ChatModel, ChatModelError, NormalizeError, SpeechSynthesizer,
    SynthesisError, Transcriber, TranscriptionError,
};
use crate::domain::{DialogueTurn, VoiceTable};

const PERSONA_PROMPT: &str = "You are a teacher answering questions from a six year old child. \
The child has a limited vocabulary, so use simple words and short sentences. \
The child also does not yet have a good understanding of the world, science or math.";

/// Sequences one inbound question through normalize, transcribe, complete
/// and synthesize. Single-shot: any stage failure aborts the rest.
pub struct AskService<N, T, C, S>
where
    N: AudioNormalizer,
    T: Transcriber,
    C: ChatModel,
    S: SpeechSynthesizer,
{
    normalizer: Arc<N>,
    transcriber: Arc<T>,
    chat_model: Arc<C>,
    synthesizer: Arc<S>,
    voices: VoiceTable,
}

impl<N, T, C, S> AskService<N, T, C, S>
where
    N: AudioNormalizer,
    T: Transcriber,
    C: ChatModel,
    S: SpeechSynthesizer,
{
    pub fn new(
        normalizer: Arc<N>,
        transcriber: Arc<T>,
        chat_model: Arc<C>,
        synthesizer: Arc<S>,
        voices: VoiceTable,
    ) -> Self {
        Self {
            normalizer,
            transcriber,
            chat_model,
            synthesizer,
            voices,
        }
    }

    pub async fn ask(
        &self,
        clip: &[u8],
        media_type: &str,
        history: &[DialogueTurn],
        language: &str,
    ) -> Result<AskOutcome, AskError> {
        // The voice lookup runs first so an unsupported language never pays
        // for transcription or completion.
        let voice = self
            .voices
            .voice_for(language)
            .ok_or_else(|| AskError::UnsupportedLanguage(language.to_string()))?
            .clone();

        let audio = self.normalizer.normalize(clip, media_type).await?;

        let question = self.transcriber.transcribe(&audio, language).await?;
        tracing::debug!(chars = question.len(), "Transcript received");

        let messages = build_messages(&question, history);
        let answer = self.chat_model.complete(&messages).await?;
        tracing::debug!(chars = answer.len(), "Completion received");

        let speech = self.synthesizer.synthesize(&answer, &voice).await?;

        Ok(AskOutcome {
            question,
            answer,
            speech,
        })
    }
}

/// Expand the persona, the replayed history and the new question into the
/// provider message sequence: each turn becomes one user message (the turn's
/// question) and one system message (the turn's answer), oldest first.
pub fn build_messages(question: &str, history: &[DialogueTurn]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2 * history.len() + 2);
    messages.push(ChatMessage::system(PERSONA_PROMPT));
    for turn in history {
        messages.push(ChatMessage::user(turn.question.clone()));
        messages.push(ChatMessage::system(turn.answer.clone()));
    }
    messages.push(ChatMessage::user(question));
    messages
}

#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub question: String,
    pub answer: String,
    pub speech: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("normalize: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("completion: {0}")]
    Completion(#[from] ChatModelError),
    #[error("synthesis: {0}")]
    Synthesis(#[from] SynthesisError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_history_when_building_messages_then_persona_plus_question() {
        let messages = build_messages("why is the sky blue?", &[]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "why is the sky blue?");
    }

    #[test]
    fn given_one_turn_when_building_messages_then_four_messages_in_order() {
        let history = vec![DialogueTurn {
            question: "why?".to_string(),
            answer: "because.".to_string(),
        }];

        let messages = build_messages("and then?", &history);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "why?");
        assert_eq!(messages[2].role, "system");
        assert_eq!(messages[2].content, "because.");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "and then?");
    }

    #[test]
    fn given_any_history_when_building_messages_then_length_is_twice_turns_plus_two() {
        for turns in 0..5 {
            let history: Vec<DialogueTurn> = (0..turns)
                .map(|i| DialogueTurn {
                    question: format!("q{}", i),
                    answer: format!("a{}", i),
                })
                .collect();

            let messages = build_messages("new question", &history);

            assert_eq!(messages.len(), 2 * turns + 2);
        }
    }
}
