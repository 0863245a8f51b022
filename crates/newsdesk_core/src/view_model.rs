use crate::{CategoryCount, CategoryFilter, FeedStatus, PageView, StatusEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub page: PageView,
    pub category_counts: Vec<CategoryCount>,
    pub category: CategoryFilter,
    pub search_query: String,
    pub feed: FeedStatus,
    pub loading: bool,
    pub visible: bool,
    pub last_updated: Option<String>,
    /// Oldest first.
    pub status_log: Vec<StatusEntry>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn count_for(&self, filter: CategoryFilter) -> usize {
        self.category_counts
            .iter()
            .find(|entry| entry.filter == filter)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}
