use thiserror::Error;

/// Outcome classification of one call to the search API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("API key not configured")]
    NotConfigured,
    #[error("invalid API key (HTTP 401)")]
    Auth,
    #[error("API rate limit exceeded (HTTP 429)")]
    RateLimited,
    #[error("HTTP {0}")]
    Http(u16),
    #[error("API error: {0}")]
    Api(String),
    #[error("request timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("no articles found for query")]
    EmptyResult,
}

impl IngestError {
    /// `EmptyResult` is a valid zero-match answer; everything else is a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, IngestError::EmptyResult)
    }

    /// Short operator hint shown next to the classification.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            IngestError::NotConfigured => Some("set NEWSDESK_API_KEY to a GNews API key"),
            IngestError::Auth => Some("get a free key from https://gnews.io/"),
            IngestError::RateLimited => Some("using demo data temporarily"),
            _ => None,
        }
    }
}
