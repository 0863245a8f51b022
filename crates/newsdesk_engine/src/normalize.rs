use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use newsdesk_core::{
    categorize, Article, ArticleId, SourceInfo, DEFAULT_DESCRIPTION, DEFAULT_SOURCE_NAME,
    DEFAULT_TITLE, PLACEHOLDER_URL,
};
use serde::Deserialize;

use crate::published::render_published;

static NEXT_ARTICLE_ID: AtomicU64 = AtomicU64::new(1);

/// Hands out a fresh id; ids are never reused within the process.
pub fn next_article_id() -> ArticleId {
    ArticleId(NEXT_ARTICLE_ID.fetch_add(1, Ordering::Relaxed))
}

/// One record of the search response, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub source: Option<RawSource>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSource {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Fills defaults, renders the publication time and assigns the category.
/// Empty strings count as missing. The category is computed from the source
/// text only, never from the placeholder strings.
pub fn normalize(raw: RawArticle, now: DateTime<Utc>) -> Article {
    let category = categorize(
        raw.title.as_deref().unwrap_or(""),
        raw.description.as_deref().unwrap_or(""),
        raw.content.as_deref().unwrap_or(""),
    );
    let title = or_default(raw.title, DEFAULT_TITLE);
    let description = or_default(raw.description, DEFAULT_DESCRIPTION);
    let content = or_default(raw.content, "");
    let source = raw.source.unwrap_or_default();

    Article {
        id: next_article_id(),
        url: or_default(raw.url, PLACEHOLDER_URL),
        image: raw.image.filter(|image| !image.is_empty()),
        source: SourceInfo {
            name: or_default(source.name, DEFAULT_SOURCE_NAME),
            url: or_default(source.url, PLACEHOLDER_URL),
        },
        published_at: render_published(raw.published_at.as_deref(), now),
        title,
        description,
        content,
        category,
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use newsdesk_core::Category;

    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = next_article_id();
        let b = next_article_id();
        assert!(b > a);
    }

    #[test]
    fn categorizes_with_defaulted_fields() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let raw = RawArticle {
            title: Some("Qubit counts double".into()),
            content: Some("quantum computing race".into()),
            ..RawArticle::default()
        };
        let article = normalize(raw, now);
        assert_eq!(article.category, Category::Quantum);
        assert_eq!(article.description, DEFAULT_DESCRIPTION);
        assert_eq!(article.published_at, "Recent");
    }

    #[test]
    fn missing_description_does_not_skew_category() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();

        let plain = RawArticle {
            title: Some("Weather report".into()),
            content: Some("Sunny skies".into()),
            ..RawArticle::default()
        };
        let article = normalize(plain, now);
        assert_eq!(article.description, DEFAULT_DESCRIPTION);
        assert_eq!(article.category, Category::Tech);

        let drone = RawArticle {
            title: Some("Drone delivery expands".into()),
            ..RawArticle::default()
        };
        assert_eq!(normalize(drone, now).category, Category::Robotics);

        let untitled = normalize(RawArticle::default(), now);
        assert_eq!(untitled.title, DEFAULT_TITLE);
        assert_eq!(untitled.category, Category::Tech);
    }
}
