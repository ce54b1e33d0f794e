use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    EntityId, Result, StoreError,
    store::{Entity, EntityStore, Removal},
};

/// In-memory entity store.
///
/// Records live in a vector behind a read-write lock for the lifetime of
/// the process. Clones share the same underlying collection.
pub struct InMemoryStore<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Entity> InMemoryStore<T> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a store pre-populated with `records`.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn find(&self, id: &EntityId) -> Result<Option<T>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn append(&self, entity: T) -> Result<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == entity.id()) {
            return Err(StoreError::DuplicateId(entity.id().clone()));
        }
        tracing::trace!(id = %entity.id(), "appending record");
        records.push(entity);
        Ok(())
    }

    async fn update<F, R>(&self, id: &EntityId, f: F) -> Result<Option<R>>
    where
        F: FnOnce(&mut T) -> R + Send,
        R: Send,
    {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id() == id).map(f))
    }

    async fn remove_if<F>(&self, id: &EntityId, guard: F) -> Result<Removal<T>>
    where
        F: FnOnce(&T) -> bool + Send,
    {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(Removal::Missing);
        };

        if guard(&records[index]) {
            Ok(Removal::Removed(records.remove(index)))
        } else {
            Ok(Removal::Retained(records[index].clone()))
        }
    }
}
