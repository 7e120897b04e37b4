//! Search + pagination shared by every entity listing.

use serde::{Deserialize, Serialize};

use crate::domain::common::Searchable;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Search term and page request owned by a listing screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub search_term: String,
    /// 1-based page index.
    #[serde(default = "ListQuery::first_page")]
    pub page: usize,
    #[serde(default = "ListQuery::default_page_size")]
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page: Self::first_page(),
            page_size: Self::default_page_size(),
        }
    }
}

impl ListQuery {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            page,
            page_size,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    fn first_page() -> usize {
        1
    }

    fn default_page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }

    /// The lower-cased term, or `None` when it is blank and should not filter.
    ///
    /// Surrounding whitespace of a non-blank term is kept and takes part in matching.
    pub fn normalized_term(&self) -> Option<String> {
        if self.search_term.trim().is_empty() {
            None
        } else {
            Some(self.search_term.to_lowercase())
        }
    }

    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Pulls `page` back into `[1, max(1, total_pages)]` after the collection changed.
    pub fn reclamp(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    /// Resets to the first page, as a screen does when the search term changes.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }
}

/// The slice of a listing shown on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<T> {
    pub visible_items: Vec<T>,
    pub effective_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub page_size: usize,
}

impl<T> PageView<T> {
    pub fn has_previous(&self) -> bool {
        self.effective_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.effective_page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.visible_items.is_empty()
    }

    /// 1-based index of the first visible item, 0 when nothing is visible.
    pub fn first_index(&self) -> usize {
        if self.visible_items.is_empty() {
            0
        } else {
            (self.effective_page - 1) * self.page_size + 1
        }
    }

    /// Human summary such as `11-20 of 23`.
    pub fn range_label(&self) -> String {
        if self.visible_items.is_empty() {
            return format!("0 of {}", self.filtered_count);
        }
        let first = self.first_index();
        let last = first + self.visible_items.len() - 1;
        format!("{first}-{last} of {}", self.filtered_count)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageView<U> {
        PageView {
            visible_items: self.visible_items.into_iter().map(f).collect(),
            effective_page: self.effective_page,
            total_pages: self.total_pages,
            filtered_count: self.filtered_count,
            page_size: self.page_size,
        }
    }
}

pub struct PaginatedFilteredView;

impl PaginatedFilteredView {
    /// Filters `items` by the query's search term and returns the requested page.
    ///
    /// An item matches when any field returned by `matcher`, lower-cased,
    /// contains the lower-cased term. Out-of-range pages are clamped and a
    /// zero page size is treated as 1. `items` is never modified.
    pub fn apply<'a, T, F>(items: &'a [T], query: &ListQuery, matcher: F) -> PageView<&'a T>
    where
        F: Fn(&'a T) -> Vec<&'a str>,
    {
        let filtered: Vec<&'a T> = match query.normalized_term() {
            Some(term) => items
                .iter()
                .filter(|item| {
                    matcher(*item)
                        .into_iter()
                        .any(|field| field.to_lowercase().contains(&term))
                })
                .collect(),
            None => items.iter().collect(),
        };

        let page_size = query.effective_page_size();
        let filtered_count = filtered.len();
        let total_pages = filtered_count.div_ceil(page_size).max(1);
        let effective_page = query.page.clamp(1, total_pages);
        let start = ((effective_page - 1) * page_size).min(filtered_count);
        let end = (start + page_size).min(filtered_count);

        tracing::debug!(
            total = items.len(),
            filtered = filtered_count,
            page = effective_page,
            total_pages,
            "computed listing page"
        );

        PageView {
            visible_items: filtered[start..end].to_vec(),
            effective_page,
            total_pages,
            filtered_count,
            page_size,
        }
    }

    /// [`PaginatedFilteredView::apply`] using the entity's own search fields.
    pub fn apply_searchable<'a, T: Searchable>(
        items: &'a [T],
        query: &ListQuery,
    ) -> PageView<&'a T> {
        Self::apply(items, query, |item: &'a T| item.search_fields())
    }
}
