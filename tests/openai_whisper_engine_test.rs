use axum::Router;
use axum::body::Bytes;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use askling::application::ports::{Transcriber, TranscriptionError};
use askling::infrastructure::audio::OpenAiWhisperEngine;

async fn start_mock_whisper_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/audio/transcriptions",
        post(move |body: Bytes| async move {
            // The form must carry the file, the model and the language hint.
            let raw = String::from_utf8_lossy(&body);
            if !raw.contains("name=\"file\"")
                || !raw.contains("name=\"model\"")
                || !raw.contains("name=\"language\"")
            {
                return (axum::http::StatusCode::BAD_REQUEST, "missing form field")
                    .into_response();
            }
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

#[tokio::test]
async fn given_valid_audio_bytes_when_transcribing_then_returns_trimmed_text() {
    let response_body = r#"{"text": "  why is the sky blue? "}"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, response_body).await;

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), base_url, "whisper-1".to_string());
    let result = engine.transcribe(b"fake audio bytes", "en").await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "why is the sky blue?");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_returns_error_status_when_transcribing_then_returns_api_error() {
    let response_body = r#"{"error": {"message": "quota exceeded"}}"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(429, response_body).await;

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), base_url, "whisper-1".to_string());
    let result = engine.transcribe(b"fake audio bytes", "en").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_json_response_when_transcribing_then_returns_api_error() {
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, "not json").await;

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), base_url, "whisper-1".to_string());
    let result = engine.transcribe(b"fake audio bytes", "he").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}
