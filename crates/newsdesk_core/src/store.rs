use crate::{Article, Category, CategoryFilter};

/// Articles shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// One page of the filtered view plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub articles: Vec<Article>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_filtered: usize,
    pub total_count: usize,
}

impl PageView {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub filter: CategoryFilter,
    pub count: usize,
}

/// Holds the article set and the query state; the filtered view is derived
/// on every read and never cached.
///
/// Invariant: `1 <= current_page <= total_pages()` after every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleStore {
    articles: Vec<Article>,
    category: CategoryFilter,
    search_query: String,
    current_page: usize,
    page_size: usize,
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ArticleStore {
    /// A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            articles: Vec::new(),
            category: CategoryFilter::All,
            search_query: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replaces the whole set. Filters are kept and the page is only pulled
    /// back into range, not reset.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        self.current_page = self.current_page.min(self.total_pages());
    }

    pub fn set_category(&mut self, filter: CategoryFilter) {
        self.category = filter;
        self.current_page = 1;
    }

    pub fn set_search_query(&mut self, text: &str) {
        self.search_query = text.trim().to_string();
        self.current_page = 1;
    }

    /// Moves to page `n` when it exists; returns whether the page changed.
    pub fn set_page(&mut self, n: usize) -> bool {
        if n < 1 || n > self.total_pages() || n == self.current_page {
            return false;
        }
        self.current_page = n;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(prev) => self.set_page(prev),
            None => false,
        }
    }

    pub(crate) fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// The filtered view: category first, then the search text.
    pub fn filtered(&self) -> Vec<&Article> {
        let needle = self.search_query.to_lowercase();
        self.articles
            .iter()
            .filter(|article| self.category.admits(article.category))
            .filter(|article| needle.is_empty() || article.matches_lowercase(&needle))
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    pub fn page(&self) -> PageView {
        let filtered = self.filtered();
        let total_filtered = filtered.len();
        let start = (self.current_page - 1) * self.page_size;
        let articles = filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();

        PageView {
            articles,
            current_page: self.current_page,
            total_pages: total_pages(total_filtered, self.page_size),
            total_filtered,
            total_count: self.articles.len(),
        }
    }

    /// Counts over the full set, `All` first, then table order.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts = Vec::with_capacity(Category::ALL.len() + 1);
        counts.push(CategoryCount {
            filter: CategoryFilter::All,
            count: self.articles.len(),
        });
        for category in Category::ALL {
            counts.push(CategoryCount {
                filter: CategoryFilter::Only(category),
                count: self
                    .articles
                    .iter()
                    .filter(|article| article.category == category)
                    .count(),
            });
        }
        counts
    }
}

fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size).max(1)
}
