use crate::{AppState, Effect, FeedIssue, FeedStatus, Msg, RefreshTrigger, Severity};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.log(Severity::Info, "Initializing newsdesk...");
            request_ingestion(&mut state, RefreshTrigger::Startup)
        }
        Msg::RefreshRequested(trigger) => request_ingestion(&mut state, trigger),
        Msg::SearchChanged(text) => {
            state.store_mut().set_search_query(&text);
            let query = state.store().search_query().to_string();
            if query.is_empty() {
                state.log(Severity::Info, "Clearing search filter");
            } else {
                state.log(Severity::Info, format!("Searching for: \"{query}\""));
            }
            Vec::new()
        }
        Msg::CategorySelected(filter) => {
            state.store_mut().set_category(filter);
            state.log(
                Severity::Info,
                format!("Filtering: {} articles", filter.display_name()),
            );
            Vec::new()
        }
        Msg::GoToPage(n) => {
            if state.store_mut().set_page(n) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NextPage => {
            if state.store_mut().next_page() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PrevPage => {
            if state.store_mut().prev_page() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::VisibilityChanged(visible) => {
            if visible == state.is_visible() {
                return (state, Vec::new());
            }
            state.set_visible(visible);
            state.mark_dirty();
            if visible {
                vec![Effect::ScheduleVisibilityRefresh]
            } else {
                vec![Effect::CancelVisibilityRefresh]
            }
        }
        Msg::IngestionFinished {
            request_id,
            articles,
            issue,
            fetched_at,
        } => {
            let count = articles.len();
            let feed = match &issue {
                Some(issue) => FeedStatus::Demo(issue.clone()),
                None => FeedStatus::Live,
            };
            if !state.complete_request(request_id, articles, feed, fetched_at) {
                state.log(
                    Severity::Warning,
                    format!("Discarded stale result for request #{request_id}"),
                );
                return (state, Vec::new());
            }
            match issue {
                None => state.log(Severity::Success, format!("Retrieved {count} articles")),
                Some(issue) => {
                    state.log(issue_severity(&issue), format!("{issue}"));
                    state.log(Severity::Success, format!("Loaded {count} demo articles"));
                }
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn request_ingestion(state: &mut AppState, trigger: RefreshTrigger) -> Vec<Effect> {
    if trigger == RefreshTrigger::Interval && !state.is_visible() {
        return Vec::new();
    }

    let Some(request_id) = state.begin_request() else {
        state.log(
            Severity::Info,
            format!("{} refresh skipped: fetch already in flight", trigger_label(trigger)),
        );
        return Vec::new();
    };

    match trigger {
        RefreshTrigger::Startup => {}
        RefreshTrigger::Manual => state.log(Severity::Info, "Manual refresh requested..."),
        RefreshTrigger::Interval => state.log(Severity::Info, "Auto-refreshing articles..."),
        RefreshTrigger::Visibility => {
            state.log(Severity::Info, "View activated, refreshing data...")
        }
    }
    state.log(Severity::Info, "Fetching latest articles...");
    state.store_mut().reset_page();

    let query = state.store().search_query();
    let query = (!query.is_empty()).then(|| query.to_string());
    vec![Effect::Ingest {
        request_id,
        query,
        probe_first: trigger == RefreshTrigger::Startup,
    }]
}

fn trigger_label(trigger: RefreshTrigger) -> &'static str {
    match trigger {
        RefreshTrigger::Startup => "Startup",
        RefreshTrigger::Manual => "Manual",
        RefreshTrigger::Interval => "Auto",
        RefreshTrigger::Visibility => "Visibility",
    }
}

fn issue_severity(issue: &FeedIssue) -> Severity {
    match issue {
        FeedIssue::EmptyResult => Severity::Info,
        FeedIssue::NotConfigured => Severity::Warning,
        _ => Severity::Error,
    }
}
