//! Axum HTTP route for phrase generation.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};

use super::client::ChatClient;
use super::{PhraseRequest, PhraseResponse};
use crate::error::PhraseError;
use crate::mood::PhraseHint;
use crate::params::ServerConfig;

pub const GENERATE_PHRASE_PATH: &str = "/api/generate-phrase";

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// None when no credential is configured
    client: Option<Arc<ChatClient>>,
    max_description_chars: usize,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self, PhraseError> {
        let client = match ChatClient::new(config) {
            Ok(client) => Some(Arc::new(client)),
            Err(PhraseError::MissingCredential) => {
                tracing::warn!("no API key configured, every request will fall back");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            client,
            max_description_chars: config.max_description_chars,
        })
    }
}

/// Build the phrase router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(GENERATE_PHRASE_PATH, post(generate_phrase))
        .with_state(state)
}

/// Serve the phrase route until Ctrl-C
pub async fn run(config: ServerConfig) -> Result<(), PhraseError> {
    let app = build_router(AppState::new(&config)?);
    let addr = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("phrase service listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}

/// POST /api/generate-phrase - Voice a scene description
async fn generate_phrase(
    State(state): State<AppState>,
    payload: Result<Json<PhraseRequest>, JsonRejection>,
) -> (StatusCode, Json<PhraseResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("rejected phrase request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(PhraseResponse::invalid(rejection.body_text())),
            );
        }
    };

    let description = match validate_description(&request.description, state.max_description_chars) {
        Ok(description) => description,
        Err(e) => {
            tracing::warn!("{}", e);
            return (StatusCode::BAD_REQUEST, Json(PhraseResponse::invalid(e.to_string())));
        }
    };

    let Some(client) = &state.client else {
        tracing::warn!("falling back for '{}': no API key", description);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(PhraseResponse::fallback(
                description,
                PhraseError::MissingCredential.to_string(),
            )),
        );
    };

    match client.generate(description).await {
        Ok(phrase) => {
            tracing::info!("generated phrase '{}' for '{}'", phrase, description);
            (
                StatusCode::OK,
                Json(PhraseResponse::success(PhraseHint::from_phrase(phrase))),
            )
        }
        Err(e) => {
            tracing::warn!("falling back for '{}': {}", description, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PhraseResponse::fallback(description, e.to_string())),
            )
        }
    }
}

/// Trimmed description, or why it was refused
fn validate_description(description: &str, max_chars: usize) -> Result<&str, PhraseError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(PhraseError::InvalidDescription(
            "description must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > max_chars {
        return Err(PhraseError::InvalidDescription(format!(
            "description exceeds {} characters",
            max_chars
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::FALLBACK_COLOR;
    use axum::body::Body;
    use axum::http::{header, HeaderMap, Request};
    use serde_json::json;
    use std::net::SocketAddr;
    use tower::ServiceExt;

    const TEST_KEY: &str = "sk-test";

    /// Upstream stand-in that answers with a quoted phrase when authorized
    async fn stub_completions(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some("Bearer sk-test");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"message": "bad key"}})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({
                "choices": [{"message": {"role": "assistant", "content": "\"Whispers of dawn\""}}]
            })),
        )
    }

    async fn stub_failure() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
    }

    async fn spawn_upstream(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn config_for(addr: Option<SocketAddr>) -> ServerConfig {
        match addr {
            Some(addr) => ServerConfig {
                api_key: Some(TEST_KEY.to_string()),
                api_base: format!("http://{}/v1", addr),
                timeout_secs: 5,
                ..Default::default()
            },
            None => ServerConfig::default(),
        }
    }

    fn request(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(GENERATE_PHRASE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn call(router: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = router.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_generates_phrase_from_upstream() {
        let upstream = Router::new().route("/v1/chat/completions", post(stub_completions));
        let addr = spawn_upstream(upstream).await;
        let router = build_router(AppState::new(&config_for(Some(addr))).unwrap());

        let body = json!({"description": "forest at dawn"}).to_string();
        let (status, json) = call(router, request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["phrase"], "Whispers of dawn");
        assert!(json["color"].as_str().unwrap().starts_with('#'));
        assert!(json["pulseRate"].as_f64().unwrap() > 0.0);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back() {
        let router = build_router(AppState::new(&config_for(None)).unwrap());

        let body = json!({"description": "forest at dawn"}).to_string();
        let (status, json) = call(router, request(body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let phrase = json["phrase"].as_str().unwrap();
        assert!(phrase.starts_with("Fallback: Echoes of"));
        assert_eq!(phrase, "Fallback: Echoes of forest at dawn");
        assert_eq!(json["color"], FALLBACK_COLOR.to_hex());
        assert_eq!(json["pulseRate"], 1.0);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_upstream_failure_falls_back() {
        let upstream = Router::new().route("/v1/chat/completions", post(stub_failure));
        let addr = spawn_upstream(upstream).await;
        let router = build_router(AppState::new(&config_for(Some(addr))).unwrap());

        let body = json!({"description": "storm over the sea"}).to_string();
        let (status, json) = call(router, request(body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["phrase"], "Fallback: Echoes of storm over the sea");
        assert!(json["error"].as_str().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_blank_description_is_rejected() {
        let router = build_router(AppState::new(&config_for(None)).unwrap());

        let body = json!({"description": "   "}).to_string();
        let (status, json) = call(router, request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
        assert_eq!(json["color"], FALLBACK_COLOR.to_hex());
    }

    #[tokio::test]
    async fn test_oversized_description_is_rejected() {
        let router = build_router(AppState::new(&config_for(None)).unwrap());

        let body = json!({"description": "a".repeat(501)}).to_string();
        let (status, _) = call(router, request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let router = build_router(AppState::new(&config_for(None)).unwrap());

        let (status, json) = call(router, request("{\"description\": ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[test]
    fn test_validate_description_trims() {
        assert_eq!(validate_description("  misty lake ", 500).unwrap(), "misty lake");
        assert!(validate_description(&"é".repeat(500), 500).is_ok());
        assert!(validate_description(&"é".repeat(501), 500).is_err());
    }
}
