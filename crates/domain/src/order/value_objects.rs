//! Value objects for the order domain.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::validation::positive_integer;

/// One line of an order: a dish reference and how many of it.
///
/// The dish is referenced, not owned. Whatever the client sent alongside
/// `quantity` (usually the dish `id` and a copy of its fields) is kept
/// verbatim and echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: u64,
    #[serde(flatten)]
    pub dish: Map<String, Value>,
}

impl LineItem {
    /// Returns the id of the referenced dish, if any.
    pub fn dish_id(&self) -> Option<&str> {
        self.dish.get("id").and_then(Value::as_str)
    }

    /// Reads the line at `index` of a request's `dishes` list.
    pub(crate) fn from_value(index: usize, value: &Value) -> Result<Self, DomainError> {
        let invalid = || {
            DomainError::validation(format!(
                "Dish {index} must have a quantity that is an integer greater than 0"
            ))
        };

        let Value::Object(fields) = value else {
            return Err(invalid());
        };
        let quantity = fields
            .get("quantity")
            .and_then(positive_integer)
            .ok_or_else(invalid)?;

        let mut dish = fields.clone();
        dish.remove("quantity");
        Ok(Self { quantity, dish })
    }
}

/// Reads every line of a `dishes` list, stopping at the first invalid one.
pub(crate) fn line_items(values: &[Value]) -> Result<Vec<LineItem>, DomainError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| LineItem::from_value(index, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_line_item_keeps_dish_fields() {
        let item = LineItem::from_value(0, &json!({ "id": "d1", "name": "Taco", "quantity": 2 }))
            .unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.dish_id(), Some("d1"));
        assert_eq!(item.dish.get("name"), Some(&json!("Taco")));
        assert!(!item.dish.contains_key("quantity"));
    }

    #[test]
    fn test_line_item_serializes_flat() {
        let item = LineItem::from_value(0, &json!({ "id": "d1", "quantity": 3 })).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, json!({ "id": "d1", "quantity": 3 }));
    }

    #[test]
    fn test_large_quantity_is_accepted() {
        let item = LineItem::from_value(0, &json!({ "id": "d1", "quantity": 5_000_000_000u64 }))
            .unwrap();
        assert_eq!(item.quantity, 5_000_000_000);
    }

    #[test]
    fn test_invalid_quantity_reports_index() {
        for line in [
            json!({ "id": "d1" }),
            json!({ "quantity": 0 }),
            json!({ "quantity": -1 }),
            json!({ "quantity": "2" }),
            json!({ "quantity": 1.5 }),
            json!("not an object"),
        ] {
            let err = LineItem::from_value(4, &line).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Dish 4 must have a quantity that is an integer greater than 0"
            );
        }
    }

    #[test]
    fn test_line_items_reports_first_invalid_index() {
        let lines = vec![
            json!({ "quantity": 1 }),
            json!({ "quantity": 0 }),
            json!({ "quantity": "x" }),
        ];
        let err = line_items(&lines).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Dish 1 must have a quantity that is an integer greater than 0"
        );
    }
}
