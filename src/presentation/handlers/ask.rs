use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;

use crate::application::ports::{AudioNormalizer, ChatModel, SpeechSynthesizer, Transcriber};
use crate::application::services::AskError;
use crate::domain::{DialogueTurn, parse_history};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    pub audio_base64: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accepts a multipart form with `audio`, `previous_responses` and
/// `language`, runs the ask pipeline and returns the transcript, the answer
/// and the synthesized speech (base64) in one JSON envelope.
#[tracing::instrument(skip(state, multipart))]
pub async fn ask_handler<N, T, C, S>(
    State(state): State<AppState<N, T, C, S>>,
    mut multipart: Multipart,
) -> Response
where
    N: AudioNormalizer + 'static,
    T: Transcriber + 'static,
    C: ChatModel + 'static,
    S: SpeechSynthesizer + 'static,
{
    let mut audio: Option<(Vec<u8>, String)> = None;
    let mut history: Vec<DialogueTurn> = Vec::new();
    let mut language: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return bad_request(format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "audio" => {
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = match field.bytes().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read audio field");
                        return bad_request(format!("Failed to read audio: {}", e));
                    }
                };
                audio = Some((data.to_vec(), media_type));
            }
            "previous_responses" => {
                let raw = match field.text().await {
                    Ok(t) => t,
                    Err(e) => {
                        return bad_request(format!("Failed to read previous_responses: {}", e));
                    }
                };
                history = match parse_history(&raw) {
                    Ok(turns) => turns,
                    Err(e) => {
                        tracing::warn!(error = %e, "Rejected malformed history");
                        return bad_request(e.to_string());
                    }
                };
            }
            "language" => {
                language = match field.text().await {
                    Ok(t) => Some(t),
                    Err(e) => return bad_request(format!("Failed to read language: {}", e)),
                };
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
            }
        }
    }

    let Some((clip, media_type)) = audio else {
        return bad_request("Missing form field: audio".to_string());
    };
    let Some(language) = language else {
        return bad_request("Missing form field: language".to_string());
    };

    tracing::debug!(
        bytes = clip.len(),
        media_type = %media_type,
        language = %language,
        turns = history.len(),
        "Processing ask request"
    );

    match state
        .ask_service
        .ask(&clip, &media_type, &history, &language)
        .await
    {
        Ok(outcome) => {
            let audio_base64 = general_purpose::STANDARD.encode(&outcome.speech);
            (
                StatusCode::OK,
                Json(AskResponse {
                    question: outcome.question,
                    answer: outcome.answer,
                    audio_base64,
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = match &e {
                AskError::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
                AskError::Normalize(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AskError::Transcription(_) | AskError::Completion(_) | AskError::Synthesis(_) => {
                    StatusCode::BAD_GATEWAY
                }
            };
            tracing::error!(error = %e, status = %status, "Ask pipeline failed");
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}
