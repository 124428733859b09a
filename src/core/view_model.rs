//! List view model: filter, sort and paginate an in-memory collection
//!
//! A [`ListViewModel`] backs one list screen. The screen fetches records from
//! its data source and hands them over with [`ListViewModel::set_collection`];
//! user interaction drives the filter, sort and page mutators; the render
//! layer reads [`ListViewModel::visible_page`] after every change.
//!
//! # Page rules
//!
//! - `1 <= current_page <= total_pages` holds after every mutator.
//! - Replacing the collection or the page size only clamps the page.
//! - Changing a filter always returns to page 1.
//! - Sorting never moves the page.
//!
//! # Example
//!
//! ```rust
//! use hostel::prelude::*;
//!
//! let mut list = ListViewModel::new(10);
//! list.set_collection(
//!     (0..25)
//!         .map(|i| Record::new("user").with_field("name", format!("user{i}")))
//!         .collect(),
//! );
//!
//! list.set_filter("name", "user2");
//! let page = list.visible_page();
//! assert_eq!(page.total_count, 6);
//! assert_eq!(page.total_pages, 1);
//! ```
//!
//! All mutators take `&mut self`.
//! Sharing one across threads needs an outer lock held across the
//! mutate-then-read sequence.

use crate::core::entity::Entity;
use crate::core::filter::{FilterSet, FilterSpec, MatchMode};
use crate::core::page::{ListQuery, PageState, VisiblePage};
use crate::core::sort::SortSpec;
use std::collections::HashMap;

/// Fields and match mode a filter name is bound to
#[derive(Debug, Clone)]
struct FilterBinding {
    fields: Vec<String>,
    mode: MatchMode,
}

/// Filter/sort/paginate state for one list screen
#[derive(Debug, Clone)]
pub struct ListViewModel<T: Entity> {
    collection: Vec<T>,
    filters: FilterSet,
    bindings: HashMap<String, FilterBinding>,
    sort: Option<SortSpec>,
    page: PageState,
}

impl<T: Entity> ListViewModel<T> {
    /// Create an empty view model. A page size of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            collection: Vec::new(),
            filters: FilterSet::new(),
            bindings: HashMap::new(),
            sort: None,
            page: PageState::new(page_size),
        }
    }

    // === Configuration ===

    /// Bind a filter name to the fields its substring search covers.
    ///
    /// Unbound names search the field with the same name.
    pub fn bind_filter<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.bind(name.into(), fields, MatchMode::Contains)
    }

    /// Bind a filter name to whole-value matching (dropdown filters)
    pub fn bind_exact_filter<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.bind(name.into(), fields, MatchMode::Equals)
    }

    fn bind<S: Into<String>>(
        &mut self,
        name: String,
        fields: impl IntoIterator<Item = S>,
        mode: MatchMode,
    ) -> &mut Self {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.bindings.insert(name, FilterBinding { fields, mode });
        self
    }

    // === Mutators ===

    /// Replace the backing collection. Keeps the current page unless it no
    /// longer exists, in which case it moves to the last page.
    pub fn set_collection(&mut self, records: Vec<T>) {
        self.collection = records;
        let total = self.filtered_count();
        let from = self.page.current_page();
        if self.page.clamp(total) {
            tracing::debug!(
                from,
                to = self.page.current_page(),
                total,
                "Clamped page after collection replace"
            );
        }
        tracing::trace!(len = self.collection.len(), total, "Collection replaced");
    }

    /// Update the named filter from raw input, or remove it when the
    /// input is blank. Always returns to page 1.
    pub fn set_filter(&mut self, name: &str, input: &str) {
        let spec = match self.bindings.get(name) {
            Some(FilterBinding {
                fields,
                mode: MatchMode::Contains,
            }) => FilterSpec::contains(name, fields.iter().cloned(), input),
            Some(FilterBinding {
                fields,
                mode: MatchMode::Equals,
            }) => FilterSpec::equals(name, fields.iter().cloned(), input),
            None => FilterSpec::contains(name, [name], input),
        };
        self.set_filter_spec(spec);
    }

    /// Install a prebuilt filter. Always returns to page 1.
    pub fn set_filter_spec(&mut self, spec: FilterSpec) {
        tracing::debug!(
            filter = spec.name(),
            active = spec.is_active(),
            "Filter changed"
        );
        self.filters.insert(spec);
        self.page.reset();
    }

    /// Drop every filter and return to page 1
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page.reset();
    }

    /// Sort by `key`. Repeating the current key flips the direction; a new
    /// key starts ascending. A blank key clears sorting. The page is kept.
    pub fn set_sort(&mut self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            self.sort = None;
            return;
        }

        self.sort = Some(match self.sort.take() {
            Some(mut current) if current.key == key => {
                current.direction = current.direction.toggle();
                current
            }
            _ => SortSpec::ascending(key),
        });

        if let Some(spec) = &self.sort {
            tracing::debug!(key = %spec.key, direction = ?spec.direction, "Sort changed");
        }
    }

    /// Replace the sort specification wholesale. The page is kept.
    pub fn set_sort_spec(&mut self, spec: Option<SortSpec>) {
        self.sort = spec;
    }

    /// Change the page size (0 is treated as 1) and clamp the page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
        let total = self.filtered_count();
        self.page.clamp(total);
        tracing::debug!(
            page_size = self.page.page_size(),
            page = self.page.current_page(),
            "Page size changed"
        );
    }

    /// Advance one page; no-op on the last page
    pub fn next_page(&mut self) {
        let target = self.page.current_page() + 1;
        let total = self.filtered_count();
        self.page.go_to(target, total);
    }

    /// Go back one page; no-op on page 1
    pub fn prev_page(&mut self) {
        let target = self.page.current_page().saturating_sub(1);
        let total = self.filtered_count();
        self.page.go_to(target, total);
    }

    /// Jump to `page`, clamped into range
    pub fn go_to_page(&mut self, page: usize) {
        let total = self.filtered_count();
        self.page.go_to(page, total);
    }

    /// Apply view state from a query string.
    ///
    /// Filters go first (they reset the page), then page size and sort,
    /// then the requested page.
    pub fn apply_query(&mut self, query: &ListQuery) {
        for (name, input) in &query.filter {
            self.set_filter(name, input);
        }
        if let Some(limit) = query.limit {
            self.set_page_size(limit);
        }
        if let Some(expr) = &query.sort {
            self.sort = SortSpec::parse(expr);
        }
        if let Some(page) = query.page {
            self.go_to_page(page);
        }
    }

    // === Reads ===

    /// Compute the visible page: filters (AND), then a stable sort, then
    /// the slice for the current page.
    pub fn visible_page(&self) -> VisiblePage<T> {
        let mut filtered: Vec<&T> = self
            .collection
            .iter()
            .filter(|r| self.filters.matches(*r))
            .collect();

        if let Some(spec) = &self.sort {
            filtered = spec.sort_refs(filtered);
        }

        let total_count = filtered.len();
        let total_pages = self.page.total_pages(total_count);
        let current_page = self.page.current_page().min(total_pages);
        let page_size = self.page.page_size();
        let start = (current_page - 1) * page_size;

        let rows = filtered
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        VisiblePage {
            rows,
            current_page,
            total_pages,
            total_count,
            page_size,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.page.total_pages(self.filtered_count())
    }

    /// Number of records passing the active filters
    pub fn filtered_count(&self) -> usize {
        self.collection
            .iter()
            .filter(|r| self.filters.matches(*r))
            .count()
    }

    /// Size of the unfiltered collection
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Raw input of an active filter
    pub fn filter_input(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(FilterSpec::input)
    }

    /// Look up a record in the full collection by id
    pub fn find(&self, id: &uuid::Uuid) -> Option<&T> {
        self.collection.iter().find(|r| &r.id() == id)
    }
}

impl<T: Entity> Default for ListViewModel<T> {
    fn default() -> Self {
        Self::new(crate::core::page::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;
    use crate::core::field::FieldValue;
    use crate::core::sort::SortDirection;

    fn users(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new("user").with_field("name", format!("user{i}")))
            .collect()
    }

    fn names(page: &VisiblePage<Record>) -> Vec<String> {
        page.rows
            .iter()
            .map(|r| {
                r.get("name")
                    .and_then(FieldValue::as_string)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_empty_collection() {
        let list: ListViewModel<Record> = ListViewModel::new(10);
        let page = list.visible_page();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_count, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_first_page_of_25() {
        let mut list = ListViewModel::new(10);
        list.set_collection(users(25));

        let page = list.visible_page();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(
            names(&page),
            (0..10).map(|i| format!("user{i}")).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_set_collection_keeps_page_when_valid() {
        let mut list = ListViewModel::new(10);
        list.set_collection(users(25));
        list.next_page();
        assert_eq!(list.current_page(), 2);

        list.set_collection(users(24));
        assert_eq!(list.current_page(), 2);
    }

    #[test]
    fn test_set_collection_clamps_after_last_item_deleted() {
        let mut list = ListViewModel::new(10);
        list.set_collection(users(21));
        list.go_to_page(3);
        assert_eq!(list.visible_page().rows.len(), 1);

        list.set_collection(users(20));
        let page = list.visible_page();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.rows.len(), 10);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut list = ListViewModel::new(5);
        list.set_collection(users(25));
        list.go_to_page(4);

        list.set_filter("name", "user");
        assert_eq!(list.current_page(), 1);

        list.go_to_page(3);
        list.set_filter("name", "");
        assert_eq!(list.current_page(), 1);
        assert!(list.filters().is_empty());
    }

    #[test]
    fn test_bound_filter_searches_several_fields() {
        let mut list = ListViewModel::new(10);
        list.bind_filter("search", ["name", "email"]);
        list.set_collection(vec![
            Record::new("student")
                .with_field("name", "Asha")
                .with_field("email", "asha@hostel.in"),
            Record::new("student")
                .with_field("name", "Ravi")
                .with_field("email", "ravi@gmail.com"),
        ]);

        list.set_filter("search", "GMAIL");
        assert_eq!(names(&list.visible_page()), vec!["Ravi".to_string()]);
        assert_eq!(list.filter_input("search"), Some("GMAIL"));
    }

    #[test]
    fn test_exact_filter_binding() {
        let mut list = ListViewModel::new(10);
        list.bind_exact_filter("role", ["role"]);
        list.set_collection(vec![
            Record::new("user").with_field("name", "a").with_field("role", "warden"),
            Record::new("user").with_field("name", "b").with_field("role", "assistant warden"),
        ]);

        list.set_filter("role", "Warden");
        assert_eq!(names(&list.visible_page()), vec!["a".to_string()]);
    }

    #[test]
    fn test_sort_toggle_and_key_change() {
        let mut list: ListViewModel<Record> = ListViewModel::new(10);
        list.set_sort("name");
        assert_eq!(list.sort().map(|s| s.direction), Some(SortDirection::Ascending));
        list.set_sort("name");
        assert_eq!(list.sort().map(|s| s.direction), Some(SortDirection::Descending));
        list.set_sort("email");
        assert_eq!(list.sort(), Some(&SortSpec::ascending("email")));
        list.set_sort("  ");
        assert_eq!(list.sort(), None);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut list = ListViewModel::new(10);
        list.set_collection(users(25));
        list.next_page();
        list.set_sort("name");
        assert_eq!(list.current_page(), 2);
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut list = ListViewModel::new(10);
        list.set_collection(users(25));

        list.prev_page();
        assert_eq!(list.current_page(), 1);

        list.go_to_page(3);
        list.next_page();
        assert_eq!(list.current_page(), 3);
    }

    #[test]
    fn test_page_size_zero_normalized() {
        let mut list = ListViewModel::new(0);
        list.set_collection(users(3));
        assert_eq!(list.page_size(), 1);
        assert_eq!(list.total_pages(), 3);

        list.set_page_size(0);
        assert_eq!(list.page_size(), 1);
    }

    #[test]
    fn test_apply_query() {
        let mut list = ListViewModel::new(10);
        list.set_collection(users(25));

        let query: ListQuery = serde_json::from_str(
            r#"{"page": 2, "limit": 3, "sort": "name:desc", "filter": {"name": "user2"}}"#,
        )
        .expect("valid json");
        list.apply_query(&query);

        let page = list.visible_page();
        assert_eq!(page.total_count, 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(list.sort(), Some(&SortSpec::descending("name")));
        assert_eq!(names(&page), vec!["user21", "user20", "user2"]);
    }

    #[test]
    fn test_sort_mixed_value_types_never_panics() {
        let records: Vec<Record> = (0..80_i64)
            .map(|i| {
                let record = Record::new("room").with_field("i", i);
                match i % 4 {
                    0 => record.with_field("capacity", (i % 11).to_string()),
                    1 => record.with_field("capacity", i % 11),
                    2 => record.with_field("capacity", FieldValue::Null),
                    _ => record,
                }
            })
            .collect();
        let mut list = ListViewModel::new(100);
        list.set_collection(records);

        list.set_sort("capacity");
        let page = list.visible_page();
        assert_eq!(page.rows.len(), 80);

        let caps: Vec<String> = page
            .rows
            .iter()
            .map(|r| r.get("capacity").map(FieldValue::search_text).unwrap_or_default())
            .collect();
        assert!(caps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_find_by_id() {
        let records = users(3);
        let id = records[1].id;
        let mut list = ListViewModel::new(10);
        list.set_collection(records);
        assert_eq!(list.find(&id).map(|r| r.id), Some(id));
        assert!(list.find(&uuid::Uuid::new_v4()).is_none());
    }
}
