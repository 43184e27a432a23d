use serde::{Deserialize, Serialize};

/// One past question/answer exchange supplied by the caller to give the
/// chat-completion service conversational context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub question: String,
    pub answer: String,
}

/// Parse the caller-supplied history field into typed turns.
///
/// The wire shape is a JSON array of `{question, answer}` objects, oldest
/// first. Anything else is rejected before the pipeline touches an external
/// service.
pub fn parse_history(raw: &str) -> Result<Vec<DialogueTurn>, HistoryError> {
    serde_json::from_str(raw).map_err(|e| HistoryError::Malformed(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("malformed conversation history: {0}")]
    Malformed(String),
}
