use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

/// Fixed greeting payload served by the root liveness probe.
pub async fn greeting_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"Hello": "World"})))
}
