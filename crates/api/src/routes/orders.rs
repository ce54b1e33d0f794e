//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::EntityId;
use domain::{Order, OrderService};
use entity_store::EntityStore;
use serde_json::Value;

use super::{Data, payload};
use crate::error::ApiError;

/// GET /orders: list all orders.
#[tracing::instrument(skip(service))]
pub async fn list<S: EntityStore<Order> + 'static>(
    State(service): State<Arc<OrderService<S>>>,
) -> Result<Json<Data<Vec<Order>>>, ApiError> {
    Ok(Data::json(service.list().await?))
}

/// GET /orders/:orderId: read one order.
#[tracing::instrument(skip(service))]
pub async fn read<S: EntityStore<Order> + 'static>(
    State(service): State<Arc<OrderService<S>>>,
    Path(order_id): Path<String>,
) -> Result<Json<Data<Order>>, ApiError> {
    Ok(Data::json(service.get(&EntityId::from(order_id)).await?))
}

/// POST /orders: place an order.
#[tracing::instrument(skip(service, body))]
pub async fn create<S: EntityStore<Order> + 'static>(
    State(service): State<Arc<OrderService<S>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Data<Order>>), ApiError> {
    let order = service.create(&payload(body)?).await?;
    Ok((StatusCode::CREATED, Data::json(order)))
}

/// PUT /orders/:orderId: edit a pending order or advance its status.
#[tracing::instrument(skip(service, body))]
pub async fn update<S: EntityStore<Order> + 'static>(
    State(service): State<Arc<OrderService<S>>>,
    Path(order_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Data<Order>>, ApiError> {
    let payload = payload(body)?;
    Ok(Data::json(
        service.update(&EntityId::from(order_id), &payload).await?,
    ))
}

/// DELETE /orders/:orderId: delete a pending order.
#[tracing::instrument(skip(service))]
pub async fn delete<S: EntityStore<Order> + 'static>(
    State(service): State<Arc<OrderService<S>>>,
    Path(order_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&EntityId::from(order_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
