//! Newsdesk engine: GNews ingestion and effect execution.
mod config;
mod engine;
mod error;
mod fallback;
mod normalize;
mod published;
mod service;
mod source;

pub use config::{ConfigError, DeskConfig, API_KEY_PLACEHOLDER, DEFAULT_ENDPOINT, DEFAULT_QUERY};
pub use engine::{EngineEvent, EngineHandle};
pub use error::IngestError;
pub use fallback::fallback_articles;
pub use normalize::{next_article_id, normalize, RawArticle, RawSource};
pub use published::{render_age, render_published, UNKNOWN_TIME};
pub use service::{IngestReport, IngestionService, MAX_RESULTS, PROBE_QUERY};
pub use source::{parse_search_body, ArticleSource, GNewsSource};
