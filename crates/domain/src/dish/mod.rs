//! Dish records and the checks that guard them.

mod service;

pub use service::DishService;

use common::EntityId;
use entity_store::Entity;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::{Check, Payload, Pipeline, positive_integer};

const ENTITY: &str = "Dish";

const PRICE_MESSAGE: &str = "Dish must have a price that is an integer greater than 0";

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: u64,
}

impl Entity for Dish {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Dish {
    /// Overwrites every field except `id`.
    fn apply(&mut self, details: DishDetails) {
        self.name = details.name;
        self.description = details.description;
        self.image_url = details.image_url;
        self.price = details.price;
    }
}

/// The client-editable fields of a dish, read from a validated payload.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DishDetails {
    name: String,
    description: String,
    image_url: String,
    price: u64,
}

impl DishDetails {
    fn from_payload(payload: &Payload) -> Result<Self, DomainError> {
        Ok(Self {
            name: payload.text(ENTITY, "name")?,
            description: payload.text(ENTITY, "description")?,
            image_url: payload.text(ENTITY, "image_url")?,
            price: price(payload)?,
        })
    }

    fn into_dish(self, id: EntityId) -> Dish {
        Dish {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            price: self.price,
        }
    }
}

fn price(payload: &Payload) -> Result<u64, DomainError> {
    payload
        .get("price")
        .and_then(positive_integer)
        .ok_or_else(|| DomainError::validation(PRICE_MESSAGE))
}

/// Requires `price` to be an integer greater than 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidPrice;

impl Check for ValidPrice {
    fn name(&self) -> &'static str {
        "price"
    }

    fn check(&self, payload: &Payload) -> Result<(), DomainError> {
        price(payload).map(|_| ())
    }
}

/// Body checks shared by dish create and update.
pub fn dish_pipeline() -> Pipeline {
    Pipeline::new()
        .require(ENTITY, "name")
        .require(ENTITY, "description")
        .require(ENTITY, "image_url")
        .then(ValidPrice)
}
