//! Order records, their lifecycle, and the checks that guard them.

mod service;
mod state;
mod value_objects;

pub use service::OrderService;
pub use state::{OrderStatus, UnknownStatus};
pub use value_objects::LineItem;

use common::EntityId;
use entity_store::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::validation::{Check, Payload, Pipeline};
use value_objects::line_items;

const ENTITY: &str = "Order";

pub(crate) const STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered";

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<LineItem>,
}

impl Entity for Order {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// The client-supplied fields of an order, read from a validated payload.
#[derive(Debug, Clone, PartialEq)]
struct OrderDetails {
    deliver_to: String,
    mobile_number: String,
    status: OrderStatus,
    dishes: Vec<LineItem>,
}

impl OrderDetails {
    fn from_payload(payload: &Payload) -> Result<Self, DomainError> {
        Ok(Self {
            deliver_to: payload.text(ENTITY, "deliverTo")?,
            mobile_number: payload.text(ENTITY, "mobileNumber")?,
            status: status(payload)?,
            dishes: line_items(dishes(payload)?)?,
        })
    }

    /// Returns true if applying these details would leave everything but
    /// the status unchanged.
    fn matches_contents(&self, order: &Order) -> bool {
        self.deliver_to == order.deliver_to
            && self.mobile_number == order.mobile_number
            && self.dishes == order.dishes
    }

    fn into_order(self, id: EntityId) -> Order {
        Order {
            id,
            deliver_to: self.deliver_to,
            mobile_number: self.mobile_number,
            status: self.status,
            dishes: self.dishes,
        }
    }
}

fn dishes(payload: &Payload) -> Result<&[Value], DomainError> {
    match payload.get("dishes") {
        Some(Value::Array(items)) if !items.is_empty() => Ok(items.as_slice()),
        _ => Err(DomainError::validation(
            "Order must include at least one dish",
        )),
    }
}

fn status(payload: &Payload) -> Result<OrderStatus, DomainError> {
    payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DomainError::validation(STATUS_MESSAGE))
}

/// Requires `dishes` to be a list with at least one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidDishes;

impl Check for ValidDishes {
    fn name(&self) -> &'static str {
        "dishes_list"
    }

    fn check(&self, payload: &Payload) -> Result<(), DomainError> {
        dishes(payload).map(|_| ())
    }
}

/// Requires every line's `quantity` to be an integer greater than 0.
///
/// Reports the index of the first offending line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidQuantities;

impl Check for ValidQuantities {
    fn name(&self) -> &'static str {
        "quantity"
    }

    fn check(&self, payload: &Payload) -> Result<(), DomainError> {
        line_items(dishes(payload)?).map(|_| ())
    }
}

/// Requires `status` to name a known status. There is no default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidStatus;

impl Check for ValidStatus {
    fn name(&self) -> &'static str {
        "status"
    }

    fn check(&self, payload: &Payload) -> Result<(), DomainError> {
        status(payload).map(|_| ())
    }
}

fn body_checks() -> Pipeline {
    Pipeline::new()
        .require(ENTITY, "deliverTo")
        .require(ENTITY, "mobileNumber")
        .require(ENTITY, "dishes")
        .then(ValidDishes)
        .then(ValidQuantities)
}

/// Checks for order create. The caller supplies the initial status.
pub fn create_pipeline() -> Pipeline {
    body_checks().then(ValidStatus)
}

/// Checks for order update. The target status is mandatory; whether the
/// order may move to it is decided against the stored record.
pub fn update_pipeline() -> Pipeline {
    body_checks().then(ValidStatus)
}
