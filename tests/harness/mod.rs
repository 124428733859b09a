//! Shared test harness for list and screen testing
//!
//! Provides record builders, a data source that can be switched offline, a
//! small deterministic generator for property-style loops, and assertion
//! helpers.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod data_source_tests;

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use hostel::core::entity::{Entity, Record};
use hostel::core::error::{ConsoleError, Result};
use hostel::core::field::FieldValue;
use hostel::core::page::VisiblePage;
use hostel::core::service::DataSource;
use hostel::storage::InMemoryDataSource;

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

/// `user0..user{n-1}` with a `name` field and an `i` index field
pub fn user_batch(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            Record::new("user")
                .with_field("name", format!("user{i}"))
                .with_field("i", i as i64)
        })
        .collect()
}

/// Student-like records with varied fields for filter and sort testing.
///
/// - `name`: `Student_<i>`
/// - `email`: alternating `@hostel.in` / `@gmail.com`
/// - `year`: 1..=4
/// - `room`: present on even indices only
pub fn student_batch(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let domain = if i % 2 == 0 { "hostel.in" } else { "gmail.com" };
            let mut record = Record::new("student")
                .with_field("name", format!("Student_{i}"))
                .with_field("email", format!("student{i}@{domain}"))
                .with_field("year", (i % 4 + 1) as i64)
                .with_field("i", i as i64);
            if i % 2 == 0 {
                record.set("room", format!("A-{}", 100 + i));
            }
            record
        })
        .collect()
}

/// Small linear congruential generator; same seed, same sequence
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub fn next_below(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

// ---------------------------------------------------------------------------
// FlakyDataSource: in-memory store that can be taken offline
// ---------------------------------------------------------------------------

/// Wraps `InMemoryDataSource` and fails reads while offline
#[derive(Clone)]
pub struct FlakyDataSource {
    inner: InMemoryDataSource<Record>,
    offline: Arc<AtomicBool>,
}

impl FlakyDataSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            inner: InMemoryDataSource::with_records("user", records),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &InMemoryDataSource<Record> {
        &self.inner
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(ConsoleError::TransientFetch {
                entity_type: "user".to_string(),
                message: "network unreachable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DataSource<Record> for FlakyDataSource {
    fn entity_type(&self) -> &str {
        "user"
    }

    async fn fetch_all(&self) -> Result<Vec<Record>> {
        self.check_online()?;
        self.inner.fetch_all().await
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Record>> {
        self.check_online()?;
        self.inner.get(id).await
    }

    async fn create(&self, record: Record) -> Result<Record> {
        self.inner.create(record).await
    }

    async fn update(&self, record: Record) -> Result<Record> {
        self.inner.update(record).await
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.inner.delete(id).await
    }
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// String value of `field`, or `""`
pub fn text<T: Entity>(record: &T, field: &str) -> String {
    record
        .field_value(field)
        .and_then(|v| v.as_string().map(str::to_string))
        .unwrap_or_default()
}

/// `name` of every row on the page
pub fn names<T: Entity>(page: &VisiblePage<T>) -> Vec<String> {
    page.rows.iter().map(|r| text(r, "name")).collect()
}

/// `i` index of every row on the page
pub fn indices<T: Entity>(page: &VisiblePage<T>) -> Vec<i64> {
    page.rows
        .iter()
        .map(|r| {
            r.field_value("i")
                .and_then(|v| FieldValue::as_integer(&v))
                .unwrap_or(-1)
        })
        .collect()
}

/// Assert page number, page count and total in one go
pub fn assert_page<T>(page: &VisiblePage<T>, current: usize, total_pages: usize, total: usize) {
    assert_eq!(
        (page.current_page, page.total_pages, page.total_count),
        (current, total_pages, total),
        "expected page {}/{} of {} rows, got {}/{} of {}",
        current,
        total_pages,
        total,
        page.current_page,
        page.total_pages,
        page.total_count
    );
}

/// Assert that a list contains exactly `n` items
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}
