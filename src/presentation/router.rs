use axum::Router;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioNormalizer, ChatModel, SpeechSynthesizer, Transcriber};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{ask_handler, greeting_handler, health_handler};
use crate::presentation::state::AppState;

pub fn create_router<N, T, C, S>(state: AppState<N, T, C, S>) -> Router
where
    N: AudioNormalizer + 'static,
    T: Transcriber + 'static,
    C: ChatModel + 'static,
    S: SpeechSynthesizer + 'static,
{
    let cors = cors_layer(state.settings.server.cors_allow_origin.as_deref());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(greeting_handler))
        .route("/health", get(health_handler))
        .route("/ask", post(ask_handler::<N, T, C, S>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    if let Some(origin) = allowed_origin {
        match origin.parse::<HeaderValue>() {
            Ok(value) => {
                return CorsLayer::new()
                    .allow_origin(value)
                    .allow_methods(Any)
                    .allow_headers(Any);
            }
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Invalid CORS origin, allowing all");
            }
        }
    }
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
