//! Newsdesk core: article model, categorizer, article store and the pure
//! state machine driven by presenter intents.
mod article;
mod category;
mod effect;
mod msg;
mod state;
mod store;
mod update;
mod view_model;

pub use article::{
    Article, ArticleId, SourceInfo, DEFAULT_DESCRIPTION, DEFAULT_SOURCE_NAME, DEFAULT_TITLE,
    PLACEHOLDER_URL,
};
pub use category::{categorize, Category, CategoryFilter, UnknownCategory, DEFAULT_CATEGORY};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, FeedIssue, FeedStatus, RefreshTrigger, RequestId, Severity, StatusEntry,
    STATUS_LOG_CAPACITY,
};
pub use store::{ArticleStore, CategoryCount, PageView, DEFAULT_PAGE_SIZE};
pub use update::update;
pub use view_model::AppViewModel;
