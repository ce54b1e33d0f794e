use async_trait::async_trait;

use crate::{EntityId, Result};

/// A record owned by an entity store.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Returns the id the record is stored under.
    fn id(&self) -> &EntityId;
}

/// Outcome of a conditional removal.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal<T> {
    /// The record passed the guard and was removed.
    Removed(T),
    /// The guard refused; the record is still stored.
    Retained(T),
    /// No record with the requested id exists.
    Missing,
}

/// Core trait for entity store implementations.
///
/// A store exclusively owns its records. Readers get copies; writers
/// mutate the stored record in place through a closure, so a persistent
/// backend can be substituted without touching the callers.
/// All mutations are serialized: a reader never observes a half-updated record.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Returns all records in insertion order.
    async fn list(&self) -> Result<Vec<T>>;

    /// Looks up a record by id.
    async fn find(&self, id: &EntityId) -> Result<Option<T>>;

    /// Appends a new record.
    ///
    /// Fails with `DuplicateId` if a record with the same id exists.
    async fn append(&self, entity: T) -> Result<()>;

    /// Runs `f` against the stored record with exclusive access.
    ///
    /// Returns `None` without calling `f` when the id is unknown.
    async fn update<F, R>(&self, id: &EntityId, f: F) -> Result<Option<R>>
    where
        F: FnOnce(&mut T) -> R + Send,
        R: Send;

    /// Removes the record if `guard` accepts it.
    async fn remove_if<F>(&self, id: &EntityId, guard: F) -> Result<Removal<T>>
    where
        F: FnOnce(&T) -> bool + Send;
}
