use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Key value shipped in sample configs; treated the same as no key.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_GNEWS_API_KEY_HERE";

pub const DEFAULT_ENDPOINT: &str = "https://gnews.io/api/v4/";
pub const DEFAULT_QUERY: &str =
    "(AI OR Artificial Intelligence OR Machine Learning OR Robotics OR Technology)";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: String, value: String },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("invalid endpoint url {url:?}: {message}")]
    InvalidEndpoint { url: String, message: String },
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Recognized options. Missing fields take the defaults below, so a partial
/// document deserializes fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub endpoint_base_url: String,
    pub api_key: Option<String>,
    pub default_query: String,
    pub page_size: usize,
    pub request_timeout_ms: u64,
    pub probe_timeout_ms: u64,
    /// Zero disables the periodic refresh.
    pub auto_refresh_interval_ms: u64,
    pub visibility_refresh_delay_ms: u64,
    pub max_body_bytes: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            endpoint_base_url: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            default_query: DEFAULT_QUERY.to_string(),
            page_size: newsdesk_core::DEFAULT_PAGE_SIZE,
            request_timeout_ms: 10_000,
            probe_timeout_ms: 5_000,
            auto_refresh_interval_ms: 300_000,
            visibility_refresh_delay_ms: 30_000,
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

impl DeskConfig {
    /// Defaults overlaid with `NEWSDESK_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("NEWSDESK_ENDPOINT") {
            config.endpoint_base_url = url;
        }
        config.api_key = lookup("NEWSDESK_API_KEY").or_else(|| lookup("GNEWS_API_KEY"));
        if let Some(query) = lookup("NEWSDESK_DEFAULT_QUERY") {
            config.default_query = query;
        }

        let number = |var: &str| -> Result<Option<u64>, ConfigError> {
            match lookup(var) {
                None => Ok(None),
                Some(value) => value.trim().parse::<u64>().map(Some).map_err(|_| {
                    ConfigError::InvalidNumber {
                        var: var.to_string(),
                        value,
                    }
                }),
            }
        };

        if let Some(size) = number("NEWSDESK_PAGE_SIZE")? {
            config.page_size = size as usize;
        }
        if let Some(ms) = number("NEWSDESK_REQUEST_TIMEOUT_MS")? {
            config.request_timeout_ms = ms;
        }
        if let Some(ms) = number("NEWSDESK_PROBE_TIMEOUT_MS")? {
            config.probe_timeout_ms = ms;
        }
        if let Some(ms) = number("NEWSDESK_AUTO_REFRESH_MS")? {
            config.auto_refresh_interval_ms = ms;
        }
        if let Some(ms) = number("NEWSDESK_VISIBILITY_DELAY_MS")? {
            config.visibility_refresh_delay_ms = ms;
        }
        if let Some(bytes) = number("NEWSDESK_MAX_BODY_BYTES")? {
            config.max_body_bytes = bytes;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Zero { field: "page_size" });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Zero {
                field: "request_timeout_ms",
            });
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::Zero {
                field: "probe_timeout_ms",
            });
        }
        self.endpoint_url().map(|_| ())
    }

    /// Base endpoint with a trailing slash so `search` joins beneath it.
    pub fn endpoint_url(&self) -> Result<url::Url, ConfigError> {
        let mut base = self.endpoint_base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        url::Url::parse(&base).map_err(|err| ConfigError::InvalidEndpoint {
            url: self.endpoint_base_url.clone(),
            message: err.to_string(),
        })
    }

    /// The API key, unless it is missing, blank or the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != API_KEY_PLACEHOLDER)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn auto_refresh_interval(&self) -> Option<Duration> {
        (self.auto_refresh_interval_ms > 0)
            .then(|| Duration::from_millis(self.auto_refresh_interval_ms))
    }

    pub fn visibility_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.visibility_refresh_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = DeskConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DeskConfig::default());
        assert_eq!(config.page_size, 9);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.usable_api_key(), None);
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = DeskConfig::from_lookup(lookup_from(&[
            ("NEWSDESK_API_KEY", " abc123 "),
            ("NEWSDESK_PAGE_SIZE", "12"),
            ("NEWSDESK_AUTO_REFRESH_MS", "0"),
            ("NEWSDESK_ENDPOINT", "http://localhost:9000/api"),
        ]))
        .unwrap();
        assert_eq!(config.usable_api_key(), Some("abc123"));
        assert_eq!(config.page_size, 12);
        assert_eq!(config.auto_refresh_interval(), None);
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://localhost:9000/api/"
        );
    }

    #[test]
    fn placeholder_key_is_not_usable() {
        let config = DeskConfig {
            api_key: Some(API_KEY_PLACEHOLDER.to_string()),
            ..DeskConfig::default()
        };
        assert_eq!(config.usable_api_key(), None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = DeskConfig::from_lookup(lookup_from(&[("NEWSDESK_PAGE_SIZE", "nine")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "NEWSDESK_PAGE_SIZE".to_string(),
                value: "nine".to_string(),
            }
        );

        let err =
            DeskConfig::from_lookup(lookup_from(&[("NEWSDESK_PAGE_SIZE", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero { field: "page_size" });

        let err = DeskConfig::from_lookup(lookup_from(&[("NEWSDESK_ENDPOINT", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn partial_document_deserializes_with_defaults() {
        let config: DeskConfig =
            serde_json::from_str(r#"{ "api_key": "k", "page_size": 6 }"#).unwrap();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.usable_api_key(), Some("k"));
        assert_eq!(config.endpoint_base_url, DEFAULT_ENDPOINT);
    }
}
