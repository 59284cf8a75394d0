//! Phrase service configuration.

use crate::error::ConfigError;

/// Environment variable holding the chat-completion API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Override for the API base URL (tests point this at a stub)
pub const API_BASE_VAR: &str = "ECHOSCAPE_API_BASE";
pub const MODEL_VAR: &str = "ECHOSCAPE_MODEL";
pub const TIMEOUT_VAR: &str = "ECHOSCAPE_TIMEOUT_SECS";

/// Phrase service configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    pub port: u16,

    /// Secret credential for the upstream API (None = always fall back)
    pub api_key: Option<String>,

    /// Upstream base URL, without trailing slash
    pub api_base: String,

    /// Chat model name
    pub model: String,

    /// Upstream request timeout (seconds)
    pub timeout_secs: u64,

    /// Longest accepted description (characters)
    pub max_description_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 15,
            max_description_chars: 500,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup` (empty values are ignored)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.api_key = get(API_KEY_VAR);
        if let Some(base) = get(API_BASE_VAR) {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            config.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::Env {
                name: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    pub fn with_address(mut self, host: String, port: u16) -> Self {
        self.host = host;
        self.port = port;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.api_base, "https://api.openai.com/v1");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_environment_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "sk-test"),
            (API_BASE_VAR, "http://localhost:9999/v1/"),
            (MODEL_VAR, "tiny"),
            (TIMEOUT_VAR, "3"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.api_base, "http://localhost:9999/v1");
        assert_eq!(config.model, "tiny");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = ServerConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { name, .. } if name == TIMEOUT_VAR));
    }
}
