//! HTTP routes and handlers

use std::path::Path;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use assistant::{ChatContext, ChatReply};
use pagescan::PageReport;

use crate::error::ApiError;
use crate::scrape;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    current_code: ChatContext,
}

/// Build the service router: API routes plus static asset passthrough.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/parse", post(parse_handler))
        .route("/chat", post(chat_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Fetch and analyze a page: metadata, structure fingerprint and ranked
/// template suggestions.
async fn parse_handler(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<PageReport>, ApiError> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingField("url"))?;

    let report = scrape::fetch_report(&state.http, url).await?;
    Ok(Json(report))
}

/// One chat turn. A missing message is the only client error here; every
/// other failure comes back as a normal reply payload carrying the error
/// text, so the caller can always render something.
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let message = request
        .message
        .as_deref()
        .filter(|message| !message.is_empty())
        .ok_or(ApiError::MissingField("message"))?;

    log::debug!("Chat request: {} chars", message.len());
    let reply = state.assistant.respond(message, &request.current_code).await;
    Ok(Json(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(assistant::AssistantConfig::default()).unwrap();
        router(state, Path::new("static"))
    }

    async fn send_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chat_missing_message_is_client_error() {
        let (status, body) = send_json(test_router(), "/chat", r#"{"currentCode": {}}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("message"));
    }

    #[tokio::test]
    async fn test_chat_empty_message_is_client_error() {
        let (status, _) =
            send_json(test_router(), "/chat", r#"{"message": "", "currentCode": {}}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_missing_url_is_client_error() {
        let (status, body) = send_json(test_router(), "/parse", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("url"));
    }

    #[tokio::test]
    async fn test_parse_blank_url_is_client_error() {
        let (status, _) = send_json(test_router(), "/parse", r#"{"url": "   "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/no/such/asset.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
