//! Dish endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::EntityId;
use domain::{Dish, DishService};
use entity_store::EntityStore;
use serde_json::Value;

use super::{Data, payload};
use crate::error::ApiError;

/// GET /dishes: list all dishes.
#[tracing::instrument(skip(service))]
pub async fn list<S: EntityStore<Dish> + 'static>(
    State(service): State<Arc<DishService<S>>>,
) -> Result<Json<Data<Vec<Dish>>>, ApiError> {
    Ok(Data::json(service.list().await?))
}

/// GET /dishes/:dishId: read one dish.
#[tracing::instrument(skip(service))]
pub async fn read<S: EntityStore<Dish> + 'static>(
    State(service): State<Arc<DishService<S>>>,
    Path(dish_id): Path<String>,
) -> Result<Json<Data<Dish>>, ApiError> {
    Ok(Data::json(service.get(&EntityId::from(dish_id)).await?))
}

/// POST /dishes: create a dish.
#[tracing::instrument(skip(service, body))]
pub async fn create<S: EntityStore<Dish> + 'static>(
    State(service): State<Arc<DishService<S>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Data<Dish>>), ApiError> {
    let dish = service.create(&payload(body)?).await?;
    Ok((StatusCode::CREATED, Data::json(dish)))
}

/// PUT /dishes/:dishId: replace a dish's fields.
#[tracing::instrument(skip(service, body))]
pub async fn update<S: EntityStore<Dish> + 'static>(
    State(service): State<Arc<DishService<S>>>,
    Path(dish_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Data<Dish>>, ApiError> {
    let payload = payload(body)?;
    Ok(Data::json(
        service.update(&EntityId::from(dish_id), &payload).await?,
    ))
}
