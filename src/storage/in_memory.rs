//! In-memory implementation of DataSource for testing and development

use crate::core::entity::Entity;
use crate::core::error::{ConsoleError, Result};
use crate::core::service::DataSource;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory data source
///
/// Records are kept in insertion order so `fetch_all` is deterministic.
/// Uses RwLock for thread-safe access; clones share the same store.
#[derive(Clone)]
pub struct InMemoryDataSource<T: Entity> {
    entity_type: String,
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
    unique_fields: Vec<String>,
}

impl<T: Entity> InMemoryDataSource<T> {
    /// Create an empty data source for `entity_type`
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            records: Arc::new(RwLock::new(IndexMap::new())),
            unique_fields: Vec::new(),
        }
    }

    /// Reject writes that would duplicate this field's value
    /// (case-insensitive) on another record.
    pub fn with_unique_field(mut self, field: impl Into<String>) -> Self {
        self.unique_fields.push(field.into());
        self
    }

    /// Create a data source pre-filled with `records`
    pub fn with_records(entity_type: impl Into<String>, records: Vec<T>) -> Self {
        let source = Self::new(entity_type);
        if let Ok(mut map) = source.records.write() {
            map.extend(records.into_iter().map(|r| (r.id(), r)));
        }
        source
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<Uuid, T>>> {
        self.records.read().map_err(|e| ConsoleError::TransientFetch {
            entity_type: self.entity_type.clone(),
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<Uuid, T>>> {
        self.records.write().map_err(|e| ConsoleError::TransientFetch {
            entity_type: self.entity_type.clone(),
            message: format!("Failed to acquire write lock: {}", e),
        })
    }

    fn check_unique(&self, records: &IndexMap<Uuid, T>, candidate: &T) -> Result<()> {
        for field in &self.unique_fields {
            let Some(value) = candidate.field_value(field) else {
                continue;
            };
            let needle = value.search_text();
            if needle.is_empty() {
                continue;
            }

            let taken = records.values().any(|other| {
                other.id() != candidate.id()
                    && other
                        .field_value(field)
                        .is_some_and(|v| v.search_text() == needle)
            });

            if taken {
                return Err(ConsoleError::Conflict {
                    entity_type: self.entity_type.clone(),
                    field: field.clone(),
                    value: needle,
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Entity> DataSource<T> for InMemoryDataSource<T> {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    async fn fetch_all(&self) -> Result<Vec<T>> {
        let records = self.read()?;
        Ok(records.values().cloned().collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let records = self.read()?;
        Ok(records.get(id).cloned())
    }

    async fn create(&self, record: T) -> Result<T> {
        let mut records = self.write()?;

        if records.contains_key(&record.id()) {
            return Err(ConsoleError::duplicate_id(&self.entity_type, record.id()));
        }
        self.check_unique(&records, &record)?;

        records.insert(record.id(), record.clone());
        tracing::debug!(entity_type = %self.entity_type, id = %record.id(), "Record created");

        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T> {
        let mut records = self.write()?;

        if !records.contains_key(&record.id()) {
            return Err(ConsoleError::NotFound {
                entity_type: self.entity_type.clone(),
                id: record.id(),
            });
        }
        self.check_unique(&records, &record)?;

        records.insert(record.id(), record.clone());
        tracing::debug!(entity_type = %self.entity_type, id = %record.id(), "Record updated");

        Ok(record)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut records = self.write()?;

        records
            .shift_remove(id)
            .ok_or_else(|| ConsoleError::NotFound {
                entity_type: self.entity_type.clone(),
                id: *id,
            })?;
        tracing::debug!(entity_type = %self.entity_type, id = %id, "Record deleted");

        Ok(())
    }
}
