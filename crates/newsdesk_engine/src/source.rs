use std::time::Duration;

use desk_logging::desk_debug;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::normalize::RawArticle;
use crate::{ConfigError, DeskConfig, IngestError};

/// Something that can answer a search query with raw article records.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    async fn search(&self, query: &str, max: usize) -> Result<Vec<RawArticle>, IngestError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    articles: Option<Vec<RawArticle>>,
    errors: Option<Value>,
}

/// GNews `search` endpoint over reqwest.
#[derive(Debug, Clone)]
pub struct GNewsSource {
    client: reqwest::Client,
    base: Url,
    api_key: String,
    max_body_bytes: u64,
}

impl GNewsSource {
    pub fn from_config(config: &DeskConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10).min(config.request_timeout()))
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;

        Ok(Self {
            client,
            base: config.endpoint_url()?,
            api_key: config.usable_api_key().unwrap_or_default().to_string(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// `{base}search?q=..&token=..&lang=en&max=..`
    pub fn search_url(&self, query: &str, max: usize) -> Url {
        let mut url = self
            .base
            .join("search")
            .unwrap_or_else(|_| self.base.clone());
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("token", &self.api_key)
            .append_pair("lang", "en")
            .append_pair("max", &max.to_string());
        url
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, IngestError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(too_large(self.max_body_bytes));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > self.max_body_bytes {
                return Err(too_large(self.max_body_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ArticleSource for GNewsSource {
    async fn search(&self, query: &str, max: usize) -> Result<Vec<RawArticle>, IngestError> {
        desk_debug!("GET {}search max={} q={:?}", self.base, max, query);

        let response = self
            .client
            .get(self.search_url(query, max))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => return Err(IngestError::Auth),
            StatusCode::TOO_MANY_REQUESTS => return Err(IngestError::RateLimited),
            _ if !status.is_success() => return Err(IngestError::Http(status.as_u16())),
            _ => {}
        }

        let body = self.read_body(response).await?;
        parse_search_body(&body)
    }
}

/// Decodes a 2xx body; an `errors` envelope wins over any articles.
pub fn parse_search_body(body: &[u8]) -> Result<Vec<RawArticle>, IngestError> {
    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|err| IngestError::Decode(err.to_string()))?;

    match response.errors {
        Some(Value::Null) | None => Ok(response.articles.unwrap_or_default()),
        Some(errors) => Err(IngestError::Api(first_error_message(&errors))),
    }
}

fn first_error_message(errors: &Value) -> String {
    let first = match errors {
        Value::Array(items) => items.first(),
        Value::Object(map) => map.get("message").or_else(|| map.values().next()),
        other => Some(other),
    };
    match first {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => Value::Object(map.clone()).to_string(),
        },
        Some(other) => other.to_string(),
        None => "Unknown error".to_string(),
    }
}

fn too_large(max_bytes: u64) -> IngestError {
    IngestError::Network(format!("response larger than {max_bytes} bytes"))
}

fn map_reqwest_error(err: reqwest::Error) -> IngestError {
    if err.is_timeout() {
        return IngestError::Timeout;
    }
    IngestError::Network(err.without_url().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_envelope_variants() {
        let body = br#"{"errors":["You did not provide an API key."]}"#;
        assert_eq!(
            parse_search_body(body).unwrap_err(),
            IngestError::Api("You did not provide an API key.".into())
        );

        let body = br#"{"errors":[{"message":"quota exhausted"}]}"#;
        assert_eq!(
            parse_search_body(body).unwrap_err(),
            IngestError::Api("quota exhausted".into())
        );

        let body = br#"{"errors":{"token":"invalid"}}"#;
        assert_eq!(
            parse_search_body(body).unwrap_err(),
            IngestError::Api("invalid".into())
        );

        let body = br#"{"errors":[]}"#;
        assert_eq!(
            parse_search_body(body).unwrap_err(),
            IngestError::Api("Unknown error".into())
        );
    }

    #[test]
    fn missing_articles_is_empty() {
        assert_eq!(parse_search_body(br#"{"totalArticles":0}"#).unwrap(), vec![]);
        assert_eq!(parse_search_body(br#"{"articles":[]}"#).unwrap(), vec![]);
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(
            parse_search_body(b"<html>"),
            Err(IngestError::Decode(_))
        ));
    }

    #[test]
    fn search_url_encodes_query() {
        let config = DeskConfig {
            api_key: Some("k1".into()),
            ..DeskConfig::default()
        };
        let source = GNewsSource::from_config(&config).unwrap();
        let url = source.search_url("AI OR Robotics", 30);
        assert_eq!(
            url.as_str(),
            "https://gnews.io/api/v4/search?q=AI+OR+Robotics&token=k1&lang=en&max=30"
        );
    }
}
