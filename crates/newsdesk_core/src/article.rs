use std::fmt;

use crate::Category;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const DEFAULT_SOURCE_NAME: &str = "Unknown Source";
/// Sentinel link used when a record has no URL.
pub const PLACEHOLDER_URL: &str = "#";

/// Opaque article identifier, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub name: String,
    pub url: String,
}

/// A normalized, categorized news record. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub image: Option<String>,
    pub source: SourceInfo,
    pub category: Category,
    /// Relative ("3h ago") or absolute ("Mar 5") time, rendered at ingestion.
    pub published_at: String,
}

impl Article {
    /// Case-insensitive substring match over title, description and content.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}
