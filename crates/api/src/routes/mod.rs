//! HTTP route handlers.

pub mod dishes;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod orders;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use domain::Payload;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Response envelope: every record or list is sent as `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

/// Unwraps the `data` object of a JSON request body.
pub(crate) fn payload(body: Result<Json<Value>, JsonRejection>) -> Result<Payload, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(Payload::from_body(body))
}
