//! Initial data loaded into the in-memory stores at startup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use common::EntityId;
use domain::{Dish, Order};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not valid JSON or has the wrong shape.
    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records of the same kind share an id.
    #[error("duplicate {entity} id in seed data: {id}")]
    DuplicateId { entity: &'static str, id: EntityId },

    /// A record breaks a domain invariant.
    #[error("invalid {entity} {id} in seed data: {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: EntityId,
        reason: &'static str,
    },
}

/// Dishes and orders to start the service with.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Seed {
    /// Reads and validates a seed file.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses and validates seed data from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let seed: Seed = serde_json::from_str(json)?;
        seed.validate()?;
        Ok(seed)
    }

    fn validate(&self) -> Result<(), SeedError> {
        unique_ids("dish", self.dishes.iter().map(|d| &d.id))?;
        unique_ids("order", self.orders.iter().map(|o| &o.id))?;

        for dish in &self.dishes {
            if [&dish.name, &dish.description, &dish.image_url]
                .iter()
                .any(|text| text.is_empty())
            {
                return Err(invalid("dish", &dish.id, "text fields must not be empty"));
            }
            if dish.price < 1 {
                return Err(invalid("dish", &dish.id, "price must be at least 1"));
            }
        }
        for order in &self.orders {
            if order.deliver_to.is_empty() || order.mobile_number.is_empty() {
                return Err(invalid("order", &order.id, "text fields must not be empty"));
            }
            if order.dishes.is_empty() {
                return Err(invalid("order", &order.id, "order has no dishes"));
            }
            if order.dishes.iter().any(|line| line.quantity < 1) {
                return Err(invalid("order", &order.id, "quantity must be at least 1"));
            }
        }
        Ok(())
    }
}

fn unique_ids<'a>(
    entity: &'static str,
    ids: impl Iterator<Item = &'a EntityId>,
) -> Result<(), SeedError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SeedError::DuplicateId {
                entity,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

fn invalid(entity: &'static str, id: &EntityId, reason: &'static str) -> SeedError {
    SeedError::InvalidRecord {
        entity,
        id: id.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use domain::OrderStatus;

    use super::*;

    #[test]
    fn parses_dishes_and_orders() {
        let seed = Seed::from_json(
            r#"{
                "dishes": [{
                    "id": "d351db2b49b69679504652ea1cf38241",
                    "name": "Dolcelatte and chickpea spaghetti",
                    "description": "Spaghetti topped with a blend of dolcelatte and fresh chickpeas",
                    "image_url": "https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg",
                    "price": 19
                }],
                "orders": [{
                    "id": "f6069a542257054114138301947672ba",
                    "deliverTo": "1600 Pennsylvania Avenue NW, Washington, DC 20500",
                    "mobileNumber": "(202) 456-1111",
                    "status": "out-for-delivery",
                    "dishes": [{ "id": "d351db2b49b69679504652ea1cf38241", "quantity": 2 }]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(seed.dishes.len(), 1);
        assert_eq!(seed.dishes[0].price, 19);
        assert_eq!(seed.orders[0].status, OrderStatus::OutForDelivery);
        assert_eq!(
            seed.orders[0].dishes[0].dish_id(),
            Some("d351db2b49b69679504652ea1cf38241")
        );
    }

    #[test]
    fn empty_object_is_an_empty_seed() {
        let seed = Seed::from_json("{}").unwrap();
        assert!(seed.dishes.is_empty());
        assert!(seed.orders.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let dish = r#"{ "id": "a", "name": "n", "description": "d", "image_url": "u", "price": 1 }"#;
        let err = Seed::from_json(&format!(r#"{{ "dishes": [{dish}, {dish}] }}"#)).unwrap_err();
        assert!(matches!(err, SeedError::DuplicateId { entity: "dish", .. }));
    }

    #[test]
    fn rejects_broken_invariants() {
        let err = Seed::from_json(
            r#"{ "dishes": [{ "id": "a", "name": "n", "description": "d", "image_url": "u", "price": 0 }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { entity: "dish", .. }));

        let err = Seed::from_json(
            r#"{ "orders": [{ "id": "o", "deliverTo": "x", "mobileNumber": "y", "status": "pending", "dishes": [] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { entity: "order", .. }));
    }

    #[test]
    fn rejects_empty_text_fields() {
        let err = Seed::from_json(
            r#"{ "dishes": [{ "id": "a", "name": "", "description": "d", "image_url": "u", "price": 3 }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { entity: "dish", .. }));

        let err = Seed::from_json(
            r#"{ "orders": [{ "id": "o", "deliverTo": "x", "mobileNumber": "", "status": "pending", "dishes": [{ "quantity": 1 }] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { entity: "order", .. }));
    }

    #[test]
    fn rejects_unknown_status() {
        let err = Seed::from_json(
            r#"{ "orders": [{ "id": "o", "deliverTo": "x", "mobileNumber": "y", "status": "lost", "dishes": [{ "quantity": 1 }] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Seed::load(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }
}
