//! Macro-generated test suite for `DataSource<Record>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod harness;
//!
//! use harness::*;
//!
//! data_source_tests!(in_memory, InMemoryDataSource::<Record>::new("user"));
//! ```
//!
//! # Generated Tests
//!
//! - `test_create_and_get`: create then retrieve, every field intact
//! - `test_get_nonexistent`: random id returns `None`
//! - `test_fetch_all_empty`: empty store returns an empty vec
//! - `test_fetch_all_keeps_order`: records come back in insertion order
//! - `test_update_existing`: changed field is persisted
//! - `test_update_nonexistent`: `NotFound`
//! - `test_delete_existing`: record is gone afterwards
//! - `test_delete_nonexistent`: `NotFound`
//! - `test_create_duplicate_id`: `Conflict` on the id field
//! - `test_concurrent_creates`: parallel creates all land

/// Generate a `DataSource<Record>` conformance suite in module `$name`.
///
/// `$factory` is re-evaluated for each test. The concurrency test clones the
/// source, so clones must share state.
#[allow(unused_macros)]
macro_rules! data_source_tests {
    ($name:ident, $factory:expr) => {
        mod $name {
            use super::*;
            use hostel::core::entity::{Entity, Record};
            use hostel::core::error::ConsoleError;
            use hostel::core::service::DataSource;
            use uuid::Uuid;

            fn person(name: &str) -> Record {
                Record::new("user")
                    .with_field("name", name)
                    .with_field("email", format!("{}@hostel.in", name.to_lowercase()))
                    .with_field("age", 20i64)
                    .with_field("score", 4.5)
                    .with_field("active", true)
            }

            #[tokio::test]
            async fn test_create_and_get() {
                let source = $factory;
                let record = person("Alice");
                let id = record.id;

                let created = source.create(record.clone()).await.unwrap();
                assert_eq!(created, record);

                let retrieved = source.get(&id).await.unwrap();
                assert_eq!(retrieved.as_ref(), Some(&record));
                assert_eq!(text(&record, "email"), "alice@hostel.in");
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let source = $factory;
                assert!(source.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_fetch_all_empty() {
                let source = $factory;
                assert_count(&source.fetch_all().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_fetch_all_keeps_order() {
                let source = $factory;
                for name in ["Carol", "Alice", "Bob"] {
                    source.create(person(name)).await.unwrap();
                }

                let all = source.fetch_all().await.unwrap();
                let names: Vec<String> = all.iter().map(|r| text(r, "name")).collect();
                assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let source = $factory;
                let mut record = source.create(person("Alice")).await.unwrap();

                record.set("name", "Alicia");
                source.update(record.clone()).await.unwrap();

                let stored = source.get(&record.id).await.unwrap().unwrap();
                assert_eq!(text(&stored, "name"), "Alicia");
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let source = $factory;
                let err = source.update(person("Ghost")).await.unwrap_err();
                assert!(matches!(err, ConsoleError::NotFound { .. }));
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let source = $factory;
                let record = source.create(person("Alice")).await.unwrap();

                source.delete(&record.id()).await.unwrap();
                assert!(source.get(&record.id()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let source = $factory;
                let err = source.delete(&Uuid::new_v4()).await.unwrap_err();
                assert_eq!(err.error_code(), "NOT_FOUND");
            }

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let source = $factory;
                let record = source.create(person("Alice")).await.unwrap();

                let err = source.create(record).await.unwrap_err();
                match err {
                    ConsoleError::Conflict { field, .. } => assert_eq!(field, "id"),
                    other => panic!("expected conflict, got {other:?}"),
                }
            }

            #[tokio::test]
            async fn test_concurrent_creates() {
                let source = $factory;

                let writes = (0..20).map(|i| {
                    let source = source.clone();
                    tokio::spawn(async move { source.create(person(&format!("user{i}"))).await })
                });
                let results = futures::future::join_all(writes).await;

                assert!(results.into_iter().all(|r| matches!(r, Ok(Ok(_)))));
                assert_count(&source.fetch_all().await.unwrap(), 20);
            }
        }
    };
}
