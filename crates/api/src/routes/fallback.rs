//! Responses for unknown paths and unsupported methods.

use axum::extract::OriginalUri;
use axum::http::Method;

use crate::error::ApiError;

/// Any path without a route.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("Path not found: {uri}"))
}

/// A known path called with a method it does not support.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{method} not allowed for {uri}"))
}
