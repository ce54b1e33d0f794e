//! Dish service: the terminal handlers for dish requests.

use std::sync::Arc;

use common::{EntityId, IdGenerator, RandomIdGenerator};
use entity_store::EntityStore;

use super::{Dish, DishDetails, dish_pipeline};
use crate::error::DomainError;
use crate::validation::{Payload, Pipeline};

/// Service for managing dishes.
///
/// Each mutating method validates the payload with its pipeline before
/// touching the store.
pub struct DishService<S: EntityStore<Dish>> {
    store: S,
    ids: Arc<dyn IdGenerator>,
    pipeline: Pipeline,
}

impl<S: EntityStore<Dish>> DishService<S> {
    /// Creates a new dish service over the given store.
    pub fn new(store: S) -> Self {
        Self::with_id_generator(store, Arc::new(RandomIdGenerator))
    }

    /// Creates a dish service that draws ids from `ids`.
    pub fn with_id_generator(store: S, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            ids,
            pipeline: dish_pipeline(),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists all dishes.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Dish>, DomainError> {
        Ok(self.store.list().await?)
    }

    /// Loads a dish by id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &EntityId) -> Result<Dish, DomainError> {
        self.store.find(id).await?.ok_or_else(|| not_found(id))
    }

    /// Validates `payload` and stores it as a new dish with a fresh id.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Payload) -> Result<Dish, DomainError> {
        self.pipeline.run(payload)?;
        let details = DishDetails::from_payload(payload)?;

        let dish = details.into_dish(self.ids.next_id());
        self.store.append(dish.clone()).await?;

        metrics::counter!("dishes_created_total").increment(1);
        tracing::info!(dish_id = %dish.id, "dish created");
        Ok(dish)
    }

    /// Overwrites the editable fields of an existing dish.
    ///
    /// The dish must exist, the payload must pass the pipeline, and a
    /// payload `id`, if set, must equal the route id.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: &EntityId, payload: &Payload) -> Result<Dish, DomainError> {
        let pipeline = &self.pipeline;
        self.store
            .update(id, |dish: &mut Dish| -> Result<Dish, DomainError> {
                pipeline.run(payload)?;
                if let Some(other) = payload.conflicting_id(id) {
                    return Err(DomainError::validation(format!(
                        "Dish id does not match route id. Dish: {other}, Route: {id}"
                    )));
                }
                dish.apply(DishDetails::from_payload(payload)?);
                Ok(dish.clone())
            })
            .await?
            .ok_or_else(|| not_found(id))?
    }
}

fn not_found(id: &EntityId) -> DomainError {
    DomainError::NotFound(format!("Dish id does not exist: {id}"))
}
