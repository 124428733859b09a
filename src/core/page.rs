//! Page state and pagination output

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default rows per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page and page size.
///
/// Both values are kept at least 1. `current_page` is only meaningful
/// together with a total count; see [`PageState::clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageState")]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

/// Unchecked wire form of [`PageState`]
#[derive(Deserialize)]
struct RawPageState {
    #[serde(default)]
    current_page: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl From<RawPageState> for PageState {
    fn from(raw: RawPageState) -> Self {
        Self {
            current_page: raw.current_page.max(1),
            page_size: raw.page_size.max(1),
        }
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows. Never less than 1.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Index of the first row on the current page
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// Pull `current_page` back into `1..=total_pages(total)`.
    /// Returns true if the page moved.
    pub fn clamp(&mut self, total: usize) -> bool {
        let last = self.total_pages(total);
        let clamped = self.current_page.clamp(1, last);
        let moved = clamped != self.current_page;
        self.current_page = clamped;
        moved
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Jump to `page`, clamped into range for `total` rows
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.current_page = page;
        self.clamp(total);
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One rendered page of a list screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisiblePage<T> {
    /// Rows on the current page, filtered and sorted
    pub rows: Vec<T>,

    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages (at least 1)
    pub total_pages: usize,

    /// Number of rows after filters
    pub total_count: usize,

    /// Rows per page
    pub page_size: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl<T> VisiblePage<T> {
    /// "Page X of Y"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

/// View state as it arrives from a query string or saved link.
///
/// ```text
/// ?page=2&limit=25&sort=name:desc&filter[name]=asha
/// ```
///
/// All members are optional; missing ones leave the current state alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Page number (starts at 1)
    pub page: Option<usize>,

    /// Number of items per page
    pub limit: Option<usize>,

    /// Sort expression: `field`, `field:asc` or `field:desc`
    pub sort: Option<String>,

    /// Raw filter inputs keyed by filter name
    pub filter: IndexMap<String, String>,
}
