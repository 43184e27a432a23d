use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use askling::application::services::AskService;
use askling::infrastructure::audio::{FfmpegNormalizer, OpenAiWhisperEngine};
use askling::infrastructure::llm::OpenAiChatClient;
use askling::infrastructure::observability::{TracingConfig, init_tracing};
use askling::infrastructure::tts::GoogleTtsClient;
use askling::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("loading configuration")?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let normalizer = Arc::new(FfmpegNormalizer::new(settings.transcode.max_concurrent));
    let transcriber = Arc::new(OpenAiWhisperEngine::new(
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        settings.openai.whisper_model.clone(),
    ));
    let chat_model = Arc::new(OpenAiChatClient::new(
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        settings.openai.chat_model.clone(),
    ));
    let synthesizer = Arc::new(GoogleTtsClient::new(
        settings.tts.api_key.clone(),
        settings.tts.base_url.clone(),
    ));

    let ask_service = Arc::new(AskService::new(
        normalizer,
        transcriber,
        chat_model,
        synthesizer,
        settings.voices.clone(),
    ));

    let state = AppState {
        ask_service,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
