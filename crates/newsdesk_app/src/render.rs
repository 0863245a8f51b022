use newsdesk_core::{AppViewModel, Article, FeedStatus, Severity};

const RULE: &str = "----------------------------------------------------------------";
const DESCRIPTION_WIDTH: usize = 140;

/// Renders the whole dashboard as plain text lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(header(view));
    lines.push(category_bar(view));
    if !view.search_query.is_empty() {
        lines.push(format!("Search: \"{}\"", view.search_query));
    }
    lines.push(RULE.to_string());

    if view.page.articles.is_empty() {
        lines.push(empty_message(view).to_string());
    } else {
        for (index, article) in view.page.articles.iter().enumerate() {
            lines.extend(article_card(index + 1, article));
        }
    }

    lines.push(RULE.to_string());
    lines.push(pagination(view));

    if !view.status_log.is_empty() {
        lines.push(String::new());
        for entry in &view.status_log {
            lines.push(format!("{} {}", severity_tag(entry.severity), entry.message));
        }
    }

    lines
}

fn header(view: &AppViewModel) -> String {
    let feed = match &view.feed {
        FeedStatus::Pending => "[CONNECTING]".to_string(),
        FeedStatus::Live => "[LIVE]".to_string(),
        FeedStatus::Demo(issue) if issue.is_empty_result() => {
            format!("[DEMO: no matches, {issue}]")
        }
        FeedStatus::Demo(issue) => format!("[DEMO: offline, {issue}]"),
    };

    let mut header = format!(
        "NEWSDESK {} | {} articles | updated {}",
        feed,
        view.page.total_count,
        view.last_updated.as_deref().unwrap_or("--:--:--")
    );
    if view.loading {
        header.push_str(" | fetching...");
    }
    if !view.visible {
        header.push_str(" | hidden");
    }
    header
}

fn category_bar(view: &AppViewModel) -> String {
    view.category_counts
        .iter()
        .map(|entry| {
            let marker = if entry.filter == view.category { "*" } else { " " };
            format!("{}{} ({})", marker, entry.filter.display_name(), entry.count)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn empty_message(view: &AppViewModel) -> &'static str {
    if view.loading && view.page.total_count == 0 {
        "Loading articles..."
    } else {
        "No articles found for the current filters. Type `refresh` to retry."
    }
}

fn article_card(number: usize, article: &Article) -> Vec<String> {
    vec![
        format!(
            "{:>2}. [{}] {}",
            number,
            article.category.display_name(),
            article.title
        ),
        format!("    {} | {}", article.source.name, article.published_at),
        format!("    {}", truncate(&article.description, DESCRIPTION_WIDTH)),
        format!("    {}", article.url),
    ]
}

fn pagination(view: &AppViewModel) -> String {
    let page = &view.page;
    let prev = if page.has_prev() { "< prev" } else { "      " };
    let next = if page.has_next() { "next >" } else { "      " };
    format!(
        "{}  Page {} of {} ({} of {} articles)  {}",
        prev, page.current_page, page.total_pages, page.total_filtered, page.total_count, next
    )
    .trim_end()
    .to_string()
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[info]",
        Severity::Success => "[ ok ]",
        Severity::Warning => "[warn]",
        Severity::Error => "[fail]",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", head.trim_end())
}

#[cfg(test)]
mod tests {
    use newsdesk_core::{update, AppState, ArticleId, Category, FeedIssue, Msg, SourceInfo};
    use pretty_assertions::assert_eq;

    use super::*;

    fn article(n: u64, title: &str, category: Category) -> Article {
        Article {
            id: ArticleId(n),
            title: title.to_string(),
            description: "Short description.".to_string(),
            content: String::new(),
            url: format!("https://example.com/{n}"),
            image: None,
            source: SourceInfo {
                name: "Example".to_string(),
                url: "https://example.com".to_string(),
            },
            category,
            published_at: "3h ago".to_string(),
        }
    }

    fn loaded(articles: Vec<Article>, issue: Option<FeedIssue>) -> AppState {
        let (state, _) = update(AppState::new(), Msg::Started);
        let request_id = state.in_flight().unwrap();
        let (state, _) = update(
            state,
            Msg::IngestionFinished {
                request_id,
                articles,
                issue,
                fetched_at: "09:15:00".into(),
            },
        );
        state
    }

    #[test]
    fn live_page_shows_cards_and_footer() {
        let articles = (1..=12)
            .map(|n| article(n, &format!("Story {n}"), Category::Ai))
            .collect();
        let (state, _) = update(loaded(articles, None), Msg::NextPage);
        let lines = render(&state.view());

        assert_eq!(lines[0], "NEWSDESK [LIVE] | 12 articles | updated 09:15:00");
        assert!(lines[1].starts_with("*ALL (12)   AI (12)"));
        assert!(lines.contains(&" 1. [AI] Story 10".to_string()));
        assert!(lines.contains(&"< prev  Page 2 of 2 (12 of 12 articles)".to_string()));
    }

    #[test]
    fn demo_header_distinguishes_empty_from_offline() {
        let demo = vec![article(1, "Demo", Category::Quantum)];
        let offline = render(&loaded(demo.clone(), Some(FeedIssue::Timeout)).view());
        assert!(offline[0].contains("[DEMO: offline, request timeout]"));

        let empty = render(&loaded(demo, Some(FeedIssue::EmptyResult)).view());
        assert!(empty[0].contains("[DEMO: no matches"));
    }

    #[test]
    fn empty_filter_shows_hint() {
        let state = loaded(vec![article(1, "Robot", Category::Robotics)], None);
        let (state, _) = update(state, Msg::SearchChanged("zzz".into()));
        let lines = render(&state.view());
        assert!(lines.iter().any(|line| line.starts_with("No articles found")));
        assert!(lines.contains(&"Search: \"zzz\"".to_string()));
    }

    #[test]
    fn long_descriptions_are_cut() {
        let text = "word ".repeat(60);
        let cut = truncate(&text, 20);
        assert_eq!(cut, "word word word wo...");
        assert_eq!(cut.chars().count(), 20);
    }
}
