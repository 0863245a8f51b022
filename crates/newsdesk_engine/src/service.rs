use std::sync::Arc;

use chrono::{Local, Utc};
use desk_logging::{desk_error, desk_info, desk_warn};
use newsdesk_core::Article;

use crate::fallback::fallback_articles;
use crate::normalize::normalize;
use crate::source::{ArticleSource, GNewsSource};
use crate::{ConfigError, DeskConfig, IngestError};

/// Upper bound requested from the API per ingestion.
pub const MAX_RESULTS: usize = 30;
/// Query used by the connectivity probe.
pub const PROBE_QUERY: &str = "test";

/// Result of one ingestion. `issue` is set exactly when `articles` holds
/// the demo fallback set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub articles: Vec<Article>,
    pub issue: Option<IngestError>,
    /// Local wall-clock time of completion, `HH:MM:SS`.
    pub fetched_at: String,
}

impl IngestReport {
    fn completed(articles: Vec<Article>, issue: Option<IngestError>) -> Self {
        Self {
            articles,
            issue,
            fetched_at: Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// The demo set paired with `issue`.
    pub fn fallback(issue: IngestError) -> Self {
        Self::completed(fallback_articles(Utc::now()), Some(issue))
    }

    pub fn is_live(&self) -> bool {
        self.issue.is_none()
    }
}

pub struct IngestionService {
    config: DeskConfig,
    source: Arc<dyn ArticleSource>,
}

impl IngestionService {
    pub fn new(config: DeskConfig, source: Arc<dyn ArticleSource>) -> Self {
        Self { config, source }
    }

    pub fn from_config(config: DeskConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let source = GNewsSource::from_config(&config)?;
        Ok(Self::new(config, Arc::new(source)))
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Minimal one-result query confirming reachability and credentials.
    pub async fn test_connection(&self) -> Result<(), IngestError> {
        if self.config.usable_api_key().is_none() {
            return Err(IngestError::NotConfigured);
        }
        tokio::time::timeout(self.config.probe_timeout(), self.source.search(PROBE_QUERY, 1))
            .await
            .map_err(|_| IngestError::Timeout)??;
        Ok(())
    }

    /// Fetches, normalizes and categorizes up to [`MAX_RESULTS`] articles in
    /// API order. A blank or missing query falls back to the default query.
    ///
    /// On timeout the request future is dropped, so nothing it produces
    /// afterwards can reach the caller.
    pub async fn fetch_articles(&self, query: Option<&str>) -> Result<Vec<Article>, IngestError> {
        if self.config.usable_api_key().is_none() {
            return Err(IngestError::NotConfigured);
        }
        let query = query
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .unwrap_or(self.config.default_query.as_str());
        desk_info!("Querying: {}", preview(query));

        let raw = tokio::time::timeout(
            self.config.request_timeout(),
            self.source.search(query, MAX_RESULTS),
        )
        .await
        .map_err(|_| IngestError::Timeout)??;

        if raw.is_empty() {
            return Err(IngestError::EmptyResult);
        }
        let now = Utc::now();
        Ok(raw.into_iter().map(|record| normalize(record, now)).collect())
    }

    /// Never fails: any problem, including an empty result, yields the demo
    /// set together with the classification.
    pub async fn ingest(&self, query: Option<&str>, probe_first: bool) -> IngestReport {
        let outcome = if probe_first {
            match self.test_connection().await {
                Ok(()) => {
                    desk_info!("API connection OK");
                    self.fetch_articles(query).await
                }
                Err(err) => Err(err),
            }
        } else {
            self.fetch_articles(query).await
        };

        match outcome {
            Ok(articles) => {
                desk_info!("Retrieved {} articles", articles.len());
                IngestReport::completed(articles, None)
            }
            Err(err) => {
                log_issue(&err);
                let report = IngestReport::fallback(err);
                desk_info!("Loaded {} demo articles", report.articles.len());
                report
            }
        }
    }
}

fn log_issue(err: &IngestError) {
    match err {
        IngestError::EmptyResult => desk_info!("{}, falling back to demo data", err),
        IngestError::NotConfigured => desk_warn!("{}, falling back to demo data", err),
        _ => desk_error!("Ingestion failed: {}, falling back to demo data", err),
    }
    if let Some(hint) = err.hint() {
        desk_info!("Hint: {}", hint);
    }
}

fn preview(query: &str) -> String {
    const MAX_CHARS: usize = 50;
    if query.chars().count() <= MAX_CHARS {
        query.to_string()
    } else {
        let head: String = query.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    }
}
