use crate::{Article, CategoryFilter, FeedIssue, RefreshTrigger, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session start: probe the API, then load.
    Started,
    /// User clicked refresh, or a background timer fired.
    RefreshRequested(RefreshTrigger),
    /// User edited the search box.
    SearchChanged(String),
    /// User picked a category in the navigation.
    CategorySelected(CategoryFilter),
    GoToPage(usize),
    NextPage,
    PrevPage,
    /// The view was hidden or brought back to the foreground.
    VisibilityChanged(bool),
    /// Engine finished an ingestion. `issue` is set when `articles` is the
    /// demo fallback set.
    IngestionFinished {
        request_id: RequestId,
        articles: Vec<Article>,
        issue: Option<FeedIssue>,
        fetched_at: String,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}
