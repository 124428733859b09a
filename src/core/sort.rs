//! Sort key and direction for list screens

use crate::core::entity::Entity;
use crate::core::field::{FieldValue, SortKey};
use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort field and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Parse `field`, `field:asc` or `field:desc`.
    ///
    /// Unrecognised direction suffixes fall back to ascending; an empty
    /// key yields `None`.
    pub fn parse(expr: &str) -> Option<Self> {
        let (key, dir) = match expr.split_once(':') {
            Some((key, dir)) => (key.trim(), dir.trim()),
            None => (expr.trim(), ""),
        };

        if key.is_empty() {
            return None;
        }

        let direction = match dir.to_ascii_lowercase().as_str() {
            "desc" | "descending" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };

        Some(Self {
            key: key.to_string(),
            direction,
        })
    }

    /// Positions of `rows` in sorted order.
    ///
    /// Keys are projected once for the whole pass, then the positions are
    /// stable-sorted, so records with equal keys keep their relative order
    /// in either direction.
    pub fn order<'a, T: Entity>(&self, rows: impl IntoIterator<Item = &'a T>) -> Vec<usize> {
        let values: Vec<Option<FieldValue>> = rows
            .into_iter()
            .map(|r| r.field_value(&self.key))
            .collect();
        let keys = SortKey::project(&values);

        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| {
            let ord = keys[a].compare(&keys[b]);
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        order
    }

    /// Sort borrowed rows
    pub fn sort_refs<'a, T: Entity>(&self, rows: Vec<&'a T>) -> Vec<&'a T> {
        self.order(rows.iter().copied())
            .into_iter()
            .map(|i| rows[i])
            .collect()
    }

    /// Sort owned rows in place
    pub fn apply<T: Entity>(&self, data: &mut Vec<T>) {
        let order = self.order(data.iter());
        let mut slots: Vec<Option<T>> = data.drain(..).map(Some).collect();
        data.extend(order.into_iter().filter_map(|i| slots[i].take()));
    }
}
