//! Phrase generation: chat-completion client, HTTP route and native client.
//!
//! The route always answers with a phrase. Invalid input and upstream
//! failures degrade to a templated phrase with a distinct color.

mod client;
mod server;
mod service;

use serde::{Deserialize, Serialize};

use crate::mood::{PhraseHint, Rgb};

// Re-export public types
pub use client::ChatClient;
pub use server::{build_router, run, AppState, GENERATE_PHRASE_PATH};
pub use service::PhraseService;

/// Color reserved for fallback and error phrases
pub const FALLBACK_COLOR: Rgb = Rgb::new(138.0 / 255.0, 138.0 / 255.0, 158.0 / 255.0);

/// Phrase shown when the request itself was rejected
pub const INVALID_INPUT_PHRASE: &str = "The void hears nothing";

/// Request body for the generate-phrase route
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhraseRequest {
    pub description: String,
}

/// Response body: the phrase hint, plus error detail on failure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseResponse {
    pub phrase: String,
    pub color: Rgb,
    pub pulse_rate: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhraseResponse {
    pub fn success(hint: PhraseHint) -> Self {
        Self {
            phrase: hint.phrase,
            color: hint.color,
            pulse_rate: hint.pulse_rate,
            error: None,
        }
    }

    /// Templated phrase for a description the upstream could not voice
    pub fn fallback(description: &str, error: impl Into<String>) -> Self {
        Self::failure(fallback_phrase(description), error)
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self::failure(INVALID_INPUT_PHRASE.to_string(), error)
    }

    fn failure(phrase: String, error: impl Into<String>) -> Self {
        Self {
            phrase,
            color: FALLBACK_COLOR,
            pulse_rate: 1.0,
            error: Some(error.into()),
        }
    }

    pub fn hint(&self) -> PhraseHint {
        PhraseHint {
            phrase: self.phrase.clone(),
            color: self.color,
            pulse_rate: self.pulse_rate,
        }
    }
}

pub fn fallback_phrase(description: &str) -> String {
    format!("Fallback: Echoes of {}", description.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_color_hex() {
        assert_eq!(FALLBACK_COLOR.to_hex(), "#8a8a9e");
    }

    #[test]
    fn test_fallback_response_shape() {
        let response = PhraseResponse::fallback(" misty lake ", "no key");
        assert_eq!(response.phrase, "Fallback: Echoes of misty lake");
        assert_eq!(response.pulse_rate, 1.0);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["color"], "#8a8a9e");
        assert_eq!(json["pulseRate"], 1.0);
        assert_eq!(json["error"], "no key");
    }

    #[test]
    fn test_success_omits_error() {
        let response = PhraseResponse::success(PhraseHint::from_phrase("Whispers of dawn"));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["phrase"], "Whispers of dawn");
    }
}
