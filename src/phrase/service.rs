//! Native client for the phrase route, run off the render thread.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use super::server::GENERATE_PHRASE_PATH;
use super::{PhraseRequest, PhraseResponse};
use crate::error::PhraseError;
use crate::mood::PhraseHint;

/// Calls a running phrase service
#[derive(Clone)]
pub struct PhraseService {
    http: reqwest::Client,
    url: String,
}

impl PhraseService {
    /// `base_url` like `http://127.0.0.1:3000`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PhraseError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PHRASE_PATH),
        })
    }

    /// Request a phrase. Fallback and error bodies are returned as responses too.
    pub async fn fetch(&self, description: &str) -> Result<PhraseResponse, PhraseError> {
        let resp = self
            .http
            .post(&self.url)
            .json(&PhraseRequest {
                description: description.to_string(),
            })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|_| PhraseError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch on a background thread; exactly one hint arrives on the receiver
    ///
    /// Unreachable services yield the local fallback phrase.
    pub fn spawn_request(&self, description: String) -> Receiver<PhraseHint> {
        let (tx, rx) = mpsc::channel();
        let service = self.clone();

        thread::spawn(move || {
            let response = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(service.fetch(&description)),
                Err(e) => Err(PhraseError::Io(e)),
            };

            let response = response.unwrap_or_else(|e| {
                tracing::warn!("phrase request failed: {}", e);
                PhraseResponse::fallback(&description, e.to_string())
            });
            if let Some(error) = &response.error {
                tracing::warn!("phrase service fell back: {}", error);
            }

            // Receiver gone means the window closed
            let _ = tx.send(response.hint());
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ServerConfig;
    use crate::phrase::{build_router, AppState, FALLBACK_COLOR};

    async fn spawn_service() -> String {
        let app = build_router(AppState::new(&ServerConfig::default()).unwrap());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[test]
    fn test_url_joins_path() {
        let service = PhraseService::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.url, "http://localhost:3000/api/generate-phrase");
    }

    #[tokio::test]
    async fn test_fetch_returns_fallback_body() {
        let base = spawn_service().await;
        let service = PhraseService::new(&base, Duration::from_secs(5)).unwrap();

        let response = service.fetch("quiet harbor").await.unwrap();
        assert_eq!(response.phrase, "Fallback: Echoes of quiet harbor");
        assert_eq!(response.color, FALLBACK_COLOR);
        assert!(response.error.is_some());
    }

    #[test]
    fn test_unreachable_service_sends_fallback() {
        // Port 9 (discard) is not expected to run an HTTP server
        let service = PhraseService::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let rx = service.spawn_request("empty room".to_string());

        let hint = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(hint.phrase, "Fallback: Echoes of empty room");
        assert_eq!(hint.color, FALLBACK_COLOR);
        assert_eq!(hint.pulse_rate, 1.0);
    }
}
