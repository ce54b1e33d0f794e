//! HTTP API server for the dish and order service.
//!
//! Provides REST endpoints for dishes and orders, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::{Dish, DishService, Order, OrderService};
use entity_store::{EntityStore, InMemoryStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::fallback::{method_not_allowed, not_found};
use seed::Seed;

/// Shared application state: one service per resource.
pub struct AppState<D: EntityStore<Dish>, O: EntityStore<Order>> {
    pub dishes: Arc<DishService<D>>,
    pub orders: Arc<OrderService<O>>,
}

impl<D: EntityStore<Dish>, O: EntityStore<Order>> AppState<D, O> {
    /// Wraps the given stores in their services.
    pub fn new(dish_store: D, order_store: O) -> Self {
        Self {
            dishes: Arc::new(DishService::new(dish_store)),
            orders: Arc::new(OrderService::new(order_store)),
        }
    }
}

impl<D: EntityStore<Dish>, O: EntityStore<Order>> Clone for AppState<D, O> {
    fn clone(&self) -> Self {
        Self {
            dishes: Arc::clone(&self.dishes),
            orders: Arc::clone(&self.orders),
        }
    }
}

/// State backed by in-memory stores.
pub type InMemoryState = AppState<InMemoryStore<Dish>, InMemoryStore<Order>>;

/// Creates in-memory application state pre-populated from `seed`.
pub fn create_default_state(seed: Seed) -> InMemoryState {
    AppState::new(
        InMemoryStore::with_records(seed.dishes),
        InMemoryStore::with_records(seed.orders),
    )
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<D, O>(state: AppState<D, O>, metrics_handle: PrometheusHandle) -> Router
where
    D: EntityStore<Dish> + 'static,
    O: EntityStore<Order> + 'static,
{
    let dishes_router = Router::new()
        .route(
            "/dishes",
            get(routes::dishes::list::<D>)
                .post(routes::dishes::create::<D>)
                .fallback(method_not_allowed),
        )
        .route(
            "/dishes/{dishId}",
            get(routes::dishes::read::<D>)
                .put(routes::dishes::update::<D>)
                .fallback(method_not_allowed),
        )
        .with_state(state.dishes);

    let orders_router = Router::new()
        .route(
            "/orders",
            get(routes::orders::list::<O>)
                .post(routes::orders::create::<O>)
                .fallback(method_not_allowed),
        )
        .route(
            "/orders/{orderId}",
            get(routes::orders::read::<O>)
                .put(routes::orders::update::<O>)
                .delete(routes::orders::delete::<O>)
                .fallback(method_not_allowed),
        )
        .with_state(state.orders);

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .merge(dishes_router)
        .merge(orders_router)
        .merge(metrics_router)
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
