//! HTTP API server.
//!
//! Exposes `POST /transcript` and `POST /summarize` with the JSON shapes the
//! web front-end expects, plus `GET /health`.

use crate::cli::Output;
use crate::config::Settings;
use crate::summary::{GeminiSummarizer, SummaryError};
use crate::transcript::{Resolver, TranscriptError};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

const TRANSCRIPT_FAILED: &str = "Failed to fetch transcript";
const SUMMARY_FAILED: &str = "Failed to generate summary";

/// Shared application state.
struct AppState {
    resolver: Resolver,
    summarizer: GeminiSummarizer,
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let resolver = Resolver::from_settings(&settings);
    let summarizer = GeminiSummarizer::new(settings.summary.clone())?;
    if !summarizer.has_api_key() {
        Output::warning("No Gemini API key configured; /summarize will return errors.");
    }

    let app = router(resolver, summarizer);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("vidsum API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Transcript", "POST /transcript");
    Output::kv("Summarize", "POST /summarize");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the API router.
pub fn router(resolver: Resolver, summarizer: GeminiSummarizer) -> Router {
    let state = Arc::new(AppState {
        resolver,
        summarizer,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/transcript", post(transcript).fallback(method_not_allowed))
        .route("/summarize", post(summarize).fallback(method_not_allowed))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct TranscriptRequest {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

#[derive(Serialize)]
struct TranscriptResponse {
    text: String,
}

#[derive(Deserialize)]
struct SummarizeRequest {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
}

async fn transcript(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let req: TranscriptRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!("Error fetching transcript: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, TRANSCRIPT_FAILED, Some(e.to_string()));
        }
    };

    let video_id = req.video_id.unwrap_or_default();
    info!("Received request for video_id: {}", video_id);

    match state.resolver.resolve(&video_id).await {
        Ok(text) => Json(TranscriptResponse { text }).into_response(),
        Err(TranscriptError::MissingVideoId) => {
            error_response(StatusCode::BAD_REQUEST, &TranscriptError::MissingVideoId.to_string(), None)
        }
        Err(e) if e.is_client_error() => {
            error_response(StatusCode::BAD_REQUEST, TRANSCRIPT_FAILED, Some(e.to_string()))
        }
        Err(e) => {
            error!("Error fetching transcript: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, TRANSCRIPT_FAILED, Some(e.to_string()))
        }
    }
}

async fn summarize(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let req: SummarizeRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!("Error summarizing text: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, SUMMARY_FAILED, Some(e.to_string()));
        }
    };

    let text = req.text.unwrap_or_default();

    match state.summarizer.summarize(&text).await {
        Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
        Err(SummaryError::InvalidInput) => {
            error_response(StatusCode::BAD_REQUEST, &SummaryError::InvalidInput.to_string(), None)
        }
        Err(SummaryError::UpstreamFailure(details)) => {
            error!("Error summarizing text: {}", details);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, SUMMARY_FAILED, Some(details))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummarySettings;
    use crate::transcript::{
        FetchError, PrimaryFailure, SubtitleArtifact, SubtitleExtractor, TranscriptEntry,
        TranscriptFetcher, VideoId,
    };
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct FailingExtractor;

    #[async_trait]
    impl SubtitleExtractor for FailingExtractor {
        async fn extract(&self, _: &VideoId, _: &SubtitleArtifact) -> Result<(), PrimaryFailure> {
            Err(PrimaryFailure::ToolNotFound("yt-dlp".into()))
        }
    }

    /// Answers by video id so one server covers every outcome.
    struct ScriptedFetcher;

    #[async_trait]
    impl TranscriptFetcher for ScriptedFetcher {
        async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptEntry>, FetchError> {
            match video_id.as_str() {
                "disabled" => Err(FetchError::TranscriptsDisabled),
                "missing" => Err(FetchError::NoTranscriptFound),
                "broken" => Err(FetchError::Other("Video unavailable".into())),
                "noclient" => Err(FetchError::Client("TLS backend unavailable".into())),
                _ => Ok(vec![
                    TranscriptEntry { text: "Hello".into(), start: 0.0, duration: 1.0 },
                    TranscriptEntry { text: "world".into(), start: 1.0, duration: 1.0 },
                ]),
            }
        }
    }

    async fn spawn_app() -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let resolver = Resolver::new(
            Arc::new(FailingExtractor),
            Arc::new(ScriptedFetcher),
            dir.path().to_path_buf(),
            "en",
        );
        // Nothing listens on the discard port, so upstream calls fail fast.
        let summarizer = GeminiSummarizer::new(SummarySettings {
            api_key: Some("test-key".into()),
            endpoint: "http://127.0.0.1:9/v1beta".into(),
            timeout_seconds: 5,
            ..Default::default()
        })
        .unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(resolver, summarizer);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), dir)
    }

    async fn post_json(base: &str, path: &str, body: Value) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(format!("{base}{path}"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_transcript_success() {
        let (base, _dir) = spawn_app().await;
        let (status, body) = post_json(&base, "/transcript", json!({"videoId": "abc123"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"text": "Hello world"}));
    }

    #[tokio::test]
    async fn test_transcript_missing_id() {
        let (base, _dir) = spawn_app().await;
        for payload in [json!({}), json!({"videoId": ""})] {
            let (status, body) = post_json(&base, "/transcript", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "Video ID is required"}));
        }
    }

    #[tokio::test]
    async fn test_transcript_client_errors() {
        let (base, _dir) = spawn_app().await;

        let (status, body) = post_json(&base, "/transcript", json!({"videoId": "disabled"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Failed to fetch transcript", "details": "Transcripts are disabled for this video"})
        );

        let (status, body) = post_json(&base, "/transcript", json!({"videoId": "missing"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Failed to fetch transcript", "details": "No transcript found for this video"})
        );
    }

    #[tokio::test]
    async fn test_transcript_unknown_error() {
        let (base, _dir) = spawn_app().await;
        let (status, body) = post_json(&base, "/transcript", json!({"videoId": "broken"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to fetch transcript", "details": "Video unavailable"})
        );
    }

    #[tokio::test]
    async fn test_transcript_client_unavailable() {
        let (base, _dir) = spawn_app().await;
        let (status, body) = post_json(&base, "/transcript", json!({"videoId": "noclient"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to fetch transcript", "details": "TLS backend unavailable"})
        );
    }

    #[tokio::test]
    async fn test_transcript_malformed_body() {
        let (base, _dir) = spawn_app().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/transcript"))
            .body("not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Failed to fetch transcript");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_summarize_empty_text() {
        let (base, _dir) = spawn_app().await;
        for payload in [json!({}), json!({"text": ""}), json!({"text": "   "})] {
            let (status, body) = post_json(&base, "/summarize", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "Missing or empty \"text\" in request body"}));
        }
    }

    #[tokio::test]
    async fn test_summarize_upstream_failure() {
        let (base, _dir) = spawn_app().await;
        let (status, body) = post_json(&base, "/summarize", json!({"text": "Hello world"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate summary");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let (base, _dir) = spawn_app().await;
        for path in ["/transcript", "/summarize"] {
            let response = reqwest::get(format!("{base}{path}")).await.unwrap();
            assert_eq!(response.status().as_u16(), 405);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({"error": "Method not allowed"}));
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (base, _dir) = spawn_app().await;
        let body: Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }
}
