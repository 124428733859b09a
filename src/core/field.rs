//! Field value types and the comparison rules used for sorting

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// Mirrors what a document store hands back for a single field: scalars,
/// nested mappings, or an explicit null. Absent fields are modelled as
/// `Option::None` by callers, not as a variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Map(IndexMap<String, FieldValue>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the nested mapping if this is a map value
    pub fn as_map(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Lowercased text used by substring search.
    ///
    /// Scalars render to their display form; maps and null have no
    /// searchable text.
    pub fn search_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.to_lowercase(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Map(_) | FieldValue::Null => String::new(),
        }
    }

    /// Numeric projection for sorting. Booleans count as 0/1.
    fn sort_number(&self) -> f64 {
        match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Float(f) => *f,
            FieldValue::Boolean(b) => f64::from(u8::from(*b)),
            _ => 0.0,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::String(value.to_string())
    }
}

/// Dates are stored as ISO-8601 text so they sort chronologically
impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::String(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A field value projected for sorting.
///
/// Keys are produced for a whole sort pass at once by
/// [`SortKey::project`], so every key in one pass has the same variant and
/// comparing them is a total order.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    /// Project the values found under one key.
    ///
    /// If any value is a string, every value becomes its lowercase text
    /// (missing is `""`). Otherwise every value becomes a number (booleans
    /// as 0/1, missing as `0`).
    pub fn project(values: &[Option<FieldValue>]) -> Vec<SortKey> {
        let text = values
            .iter()
            .any(|v| matches!(v, Some(FieldValue::String(_))));

        values
            .iter()
            .map(|v| {
                if text {
                    SortKey::Text(v.as_ref().map(FieldValue::search_text).unwrap_or_default())
                } else {
                    SortKey::Number(v.as_ref().map(FieldValue::sort_number).unwrap_or(0.0))
                }
            })
            .collect()
    }

    /// Total order; numbers rank before text if the variants ever differ
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}
