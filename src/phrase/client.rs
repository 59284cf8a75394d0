//! Chat-completion client for the upstream language model.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PhraseError;
use crate::params::ServerConfig;

const SYSTEM_PROMPT: &str = "You are the voice of an audio-reactive environment. \
Reply with one short, evocative phrase (at most eight words) that captures the mood \
of the scene the user describes. No quotes, no explanation.";

/// Upper bound on the generated phrase length
const MAX_TOKENS: u32 = 24;

const TEMPERATURE: f32 = 0.9;

/// Longest upstream error body kept in `PhraseError::Status`
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Bearer-authenticated client for `{api_base}/chat/completions`
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Fails with `MissingCredential` when no API key is configured
    pub fn new(config: &ServerConfig) -> Result<Self, PhraseError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(PhraseError::MissingCredential)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.api_base),
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the model for a phrase voicing `description`
    pub async fn generate(&self, description: &str) -> Result<String, PhraseError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: description,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PhraseError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let completion: ChatResponse = resp.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| clean_phrase(&content))
            .filter(|phrase| !phrase.is_empty())
            .ok_or(PhraseError::EmptyResponse)
    }
}

/// Strip surrounding whitespace and quote marks
pub(crate) fn clean_phrase(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’') || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_phrase_strips_quotes() {
        assert_eq!(clean_phrase("  \"Whispers of dawn\"\n"), "Whispers of dawn");
        assert_eq!(clean_phrase("“Ember tides”"), "Ember tides");
        assert_eq!(clean_phrase("it's fine"), "it's fine");
        assert_eq!(clean_phrase(" \"\" "), "");
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let config = ServerConfig::default();
        assert!(matches!(
            ChatClient::new(&config),
            Err(PhraseError::MissingCredential)
        ));
    }

    #[test]
    fn test_endpoint_from_base() {
        let config = ServerConfig {
            api_key: Some("sk-test".to_string()),
            api_base: "http://127.0.0.1:9999/v1".to_string(),
            ..Default::default()
        };
        let client = ChatClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9999/v1/chat/completions");
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Ember tides"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Ember tides")
        );

        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());
    }
}
