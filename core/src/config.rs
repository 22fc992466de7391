//! Configuration for [`HttpTransport`](crate::HttpTransport).

use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;

pub const ENV_BASE_URL: &str = "CRUD_BASE_URL";
pub const ENV_TOKEN: &str = "CRUD_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "CRUD_TIMEOUT_SECS";

/// Where requests go and which credential they carry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    /// Scheme, host and optional prefix, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    /// Bearer token attached to requests that need one.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl TransportConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// An empty token counts as no token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|token: &String| !token.is_empty());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load from `CRUD_BASE_URL` (required), `CRUD_TOKEN` and
    /// `CRUD_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{ENV_BASE_URL} is not set")))?;
        let mut config = Self::new(&base_url);
        config.token = lookup(ENV_TOKEN).filter(|token| !token.is_empty());
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{ENV_TIMEOUT_SECS} is not a number: {raw}")))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = TransportConfig::new("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: TransportConfig = serde_json::from_str(r#"{"base_url":"http://h"}"#).unwrap();
        assert_eq!(config.token, None);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn loads_all_variables() {
        let config = TransportConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://h:1/"),
            (ENV_TOKEN, "secret"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config, TransportConfig::new("http://h:1").with_token("secret").with_timeout_secs(5));
    }

    #[test]
    fn empty_token_is_no_token() {
        let config = TransportConfig::new("http://h").with_token("");
        assert_eq!(config.token, None);
        let loaded = TransportConfig::from_lookup(lookup(&[(ENV_BASE_URL, "http://h"), (ENV_TOKEN, "")])).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let err = TransportConfig::from_lookup(lookup(&[(ENV_TOKEN, "secret")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn malformed_timeout_is_an_error() {
        let err = TransportConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://h"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
