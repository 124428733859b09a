//! The data-source contract list screens are driven by

use crate::core::entity::Entity;
use crate::core::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Remote store access for one entity type
///
/// Implementations own fetch/create/update/delete against whatever backend
/// holds the records. The list view model never calls this trait; the
/// screen fetches and then hands the result to the view model.
///
/// # Errors
///
/// - `fetch_all`/`get` fail with `ConsoleError::TransientFetch` on network
///   or auth failures.
/// - `create` fails with `ConsoleError::Conflict` on duplicate keys.
/// - `update`/`delete` fail with `ConsoleError::NotFound` when the target
///   is missing.
#[async_trait]
pub trait DataSource<T: Entity>: Send + Sync {
    /// Entity type name used in errors and logs
    fn entity_type(&self) -> &str;

    /// Fetch every record
    async fn fetch_all(&self) -> Result<Vec<T>>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// Create a new record
    async fn create(&self, record: T) -> Result<T>;

    /// Replace an existing record
    async fn update(&self, record: T) -> Result<T>;

    /// Delete a record
    async fn delete(&self, id: &Uuid) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;
    use crate::storage::InMemoryDataSource;

    async fn generic_create<T, D>(source: &D, record: T) -> Result<T>
    where
        T: Entity,
        D: DataSource<T>,
    {
        source.create(record).await
    }

    #[tokio::test]
    async fn test_generic_and_boxed_sources_share_store() {
        let source = InMemoryDataSource::<Record>::new("user");
        let record = Record::new("user").with_field("name", "Asha");
        let id = record.id();

        generic_create(&source, record).await.unwrap();

        let boxed: Box<dyn DataSource<Record>> = Box::new(source.clone());
        assert_eq!(boxed.entity_type(), "user");
        assert!(boxed.get(&id).await.unwrap().is_some());
    }
}
