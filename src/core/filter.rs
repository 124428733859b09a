//! Named filter predicates built from raw user input
//!
//! Every search box and dropdown on a list screen becomes a [`FilterSpec`].
//! Input goes through [`normalize`] first: blank input turns the filter off
//! instead of matching nothing.

use crate::core::entity::Entity;
use indexmap::IndexMap;

/// Trim whitespace and lowercase. Returns `None` when nothing is left.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// How a filter compares the needle against field text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring containment (search boxes)
    Contains,
    /// Case-insensitive whole-value equality (select filters)
    Equals,
}

/// A named predicate over entities.
///
/// The predicate passes when ANY of its bound fields matches. An inactive
/// filter (blank input) passes everything.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    name: String,
    fields: Vec<String>,
    input: String,
    needle: Option<String>,
    mode: MatchMode,
}

impl FilterSpec {
    /// Substring filter over `fields`
    pub fn contains<S: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
        input: &str,
    ) -> Self {
        Self::build(name.into(), fields, input, MatchMode::Contains)
    }

    /// Equality filter over `fields`
    pub fn equals<S: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
        input: &str,
    ) -> Self {
        Self::build(name.into(), fields, input, MatchMode::Equals)
    }

    fn build<S: Into<String>>(
        name: String,
        fields: impl IntoIterator<Item = S>,
        input: &str,
        mode: MatchMode,
    ) -> Self {
        Self {
            name,
            fields: fields.into_iter().map(Into::into).collect(),
            input: input.to_string(),
            needle: normalize(input),
            mode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The raw input the filter was built from
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether the filter constrains anything
    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    /// Evaluate the predicate against an entity
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        self.fields.iter().any(|field| {
            let text = entity
                .field_value(field)
                .map(|v| v.search_text())
                .unwrap_or_default();

            match self.mode {
                MatchMode::Contains => text.contains(needle.as_str()),
                MatchMode::Equals => text == *needle,
            }
        })
    }
}

/// Active filters combined with logical AND, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: IndexMap<String, FilterSpec>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a filter, replacing any filter with the same name.
    /// Inactive filters are removed instead of stored.
    pub fn insert(&mut self, spec: FilterSpec) {
        if spec.is_active() {
            self.filters.insert(spec.name.clone(), spec);
        } else {
            self.filters.shift_remove(&spec.name);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FilterSpec> {
        self.filters.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn get(&self, name: &str) -> Option<&FilterSpec> {
        self.filters.get(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterSpec> {
        self.filters.values()
    }

    /// True when every active filter matches
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        self.filters.values().all(|f| f.matches(entity))
    }
}
