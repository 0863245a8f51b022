use std::collections::VecDeque;
use std::fmt;

use crate::view_model::AppViewModel;
use crate::{Article, ArticleStore, DEFAULT_PAGE_SIZE};

pub type RequestId = u64;

/// Entries kept in the operator status log.
pub const STATUS_LOG_CAPACITY: usize = 10;

/// What asked for a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Startup,
    Manual,
    Interval,
    Visibility,
}

/// Presenter-facing classification of why demo content is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedIssue {
    NotConfigured,
    EmptyResult,
    Auth,
    RateLimited,
    Http(u16),
    Api(String),
    Timeout,
    Network(String),
}

impl FeedIssue {
    /// True when the service answered but had nothing for the query, as
    /// opposed to being unreachable or refusing the request.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, FeedIssue::EmptyResult)
    }
}

impl fmt::Display for FeedIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedIssue::NotConfigured => write!(f, "API key not configured"),
            FeedIssue::EmptyResult => write!(f, "no articles found for current query"),
            FeedIssue::Auth => write!(f, "invalid or missing API key"),
            FeedIssue::RateLimited => write!(f, "API rate limit reached"),
            FeedIssue::Http(status) => write!(f, "HTTP {status}"),
            FeedIssue::Api(message) => write!(f, "API error: {message}"),
            FeedIssue::Timeout => write!(f, "request timeout"),
            FeedIssue::Network(message) => write!(f, "network error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedStatus {
    /// Nothing has completed yet.
    #[default]
    Pending,
    Live,
    Demo(FeedIssue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    store: ArticleStore,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    feed: FeedStatus,
    visible: bool,
    last_updated: Option<String>,
    status_log: VecDeque<StatusEntry>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            store: ArticleStore::new(page_size),
            in_flight: None,
            next_request_id: 1,
            feed: FeedStatus::Pending,
            visible: true,
            last_updated: None,
            status_log: VecDeque::with_capacity(STATUS_LOG_CAPACITY),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            page: self.store.page(),
            category_counts: self.store.category_counts(),
            category: self.store.category(),
            search_query: self.store.search_query().to_string(),
            feed: self.feed.clone(),
            loading: self.in_flight.is_some(),
            visible: self.visible,
            last_updated: self.last_updated.clone(),
            status_log: self.status_log.iter().cloned().collect(),
            dirty: self.dirty,
        }
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn feed(&self) -> &FeedStatus {
        &self.feed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn store_mut(&mut self) -> &mut ArticleStore {
        &mut self.store
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Claims the in-flight slot; `None` when a request is already running.
    pub(crate) fn begin_request(&mut self) -> Option<RequestId> {
        if self.in_flight.is_some() {
            return None;
        }
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(id);
        Some(id)
    }

    /// Applies a completed ingestion if it belongs to the in-flight request.
    pub(crate) fn complete_request(
        &mut self,
        request_id: RequestId,
        articles: Vec<Article>,
        feed: FeedStatus,
        fetched_at: String,
    ) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.store.set_articles(articles);
        self.feed = feed;
        self.last_updated = Some(fetched_at);
        true
    }

    pub(crate) fn log(&mut self, severity: Severity, message: impl Into<String>) {
        if self.status_log.len() == STATUS_LOG_CAPACITY {
            self.status_log.pop_front();
        }
        self.status_log.push_back(StatusEntry {
            severity,
            message: message.into(),
        });
        self.dirty = true;
    }
}
