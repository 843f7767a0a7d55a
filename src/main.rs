use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use aidmate::config::Config;
use aidmate::error::AidMateError;
use aidmate::pipeline::AidMateService;
use aidmate::speech;

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    language: String,
    direction: String,
    matches: Vec<serde_json::Value>,
    answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_mime: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::load();

    // Knowledge load is fatal; no fallback knowledge exists.
    let service = Arc::new(AidMateService::new(&config)?);

    let router = Router::new()
        .route("/ask", post(ask))
        .route("/health", get(|| async { "ok" }))
        .with_state(service);

    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.bind '{}': {e}", config.server.bind))?;

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "Starting AidMate server");
    axum::serve(listener, router).await?;
    Ok(())
}

async fn ask(
    State(service): State<Arc<AidMateService>>,
    Json(req): Json<AskRequest>,
) -> Response {
    match service.answer(&req.question).await {
        Ok(guidance) => {
            let (audio_base64, audio_mime) = match &guidance.audio {
                Some(artifact) => (
                    Some(artifact.to_base64()),
                    Some(speech::AUDIO_MIME.to_string()),
                ),
                None => (None, None),
            };
            Json(AskResponse {
                language: guidance.language.code().to_string(),
                direction: if guidance.language.is_rtl() {
                    "rtl".to_string()
                } else {
                    "ltr".to_string()
                },
                matches: guidance
                    .matches
                    .iter()
                    .map(|r| serde_json::Value::Object(r.0.clone()))
                    .collect(),
                answer: guidance.answer,
                audio_base64,
                audio_mime,
            })
            .into_response()
        }
        Err(e @ AidMateError::Completion(_)) => {
            tracing::error!("Completion failed: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Request failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
