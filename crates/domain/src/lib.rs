//! Domain layer for the dish and order service.
//!
//! This crate provides:
//! - Dish and Order records and their services (the terminal handlers)
//! - The fail-fast request validation pipeline
//! - The order status state machine

pub mod dish;
pub mod error;
pub mod order;
pub mod validation;

pub use dish::{Dish, DishService, ValidPrice, dish_pipeline};
pub use error::DomainError;
pub use order::{
    LineItem, Order, OrderService, OrderStatus, UnknownStatus, ValidDishes, ValidQuantities,
    ValidStatus, create_pipeline as order_create_pipeline,
    update_pipeline as order_update_pipeline,
};
pub use validation::{Check, Payload, Pipeline, RequiredField};
