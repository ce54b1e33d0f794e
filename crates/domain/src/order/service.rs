//! Order service: the terminal handlers for order requests.

use std::sync::Arc;

use common::{EntityId, IdGenerator, RandomIdGenerator};
use entity_store::{EntityStore, Removal};

use super::{Order, OrderDetails, create_pipeline, update_pipeline};
use crate::error::DomainError;
use crate::validation::{Payload, Pipeline};

/// Service for managing orders.
///
/// Wraps the store with the order pipelines and lifecycle rules.
pub struct OrderService<S: EntityStore<Order>> {
    store: S,
    ids: Arc<dyn IdGenerator>,
    create_pipeline: Pipeline,
    update_pipeline: Pipeline,
}

impl<S: EntityStore<Order>> OrderService<S> {
    /// Creates a new order service over the given store.
    pub fn new(store: S) -> Self {
        Self::with_id_generator(store, Arc::new(RandomIdGenerator))
    }

    /// Creates an order service that draws ids from `ids`.
    pub fn with_id_generator(store: S, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            ids,
            create_pipeline: create_pipeline(),
            update_pipeline: update_pipeline(),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists all orders.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.store.list().await?)
    }

    /// Loads an order by id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &EntityId) -> Result<Order, DomainError> {
        self.store.find(id).await?.ok_or_else(|| not_found(id))
    }

    /// Validates `payload` and stores it as a new order with a fresh id.
    ///
    /// The caller must supply one of the four statuses; it is kept as sent.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Payload) -> Result<Order, DomainError> {
        self.create_pipeline.run(payload)?;
        let details = OrderDetails::from_payload(payload)?;

        let order = details.into_order(self.ids.next_id());
        self.store.append(order.clone()).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id, status = %order.status, "order created");
        Ok(order)
    }

    /// Updates an existing order.
    ///
    /// Rules, in order: the order exists; the payload passes the update
    /// pipeline; a payload `id`, if set, equals the route id; the status
    /// does not move backwards or away from `delivered`; outside `pending`
    /// only the status may change.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: &EntityId, payload: &Payload) -> Result<Order, DomainError> {
        let pipeline = &self.update_pipeline;
        self.store
            .update(id, |order: &mut Order| -> Result<Order, DomainError> {
                pipeline.run(payload)?;
                if let Some(other) = payload.conflicting_id(id) {
                    return Err(DomainError::validation(format!(
                        "Order id does not match route id. Order: {other}, Route: {id}."
                    )));
                }

                let details = OrderDetails::from_payload(payload)?;
                let target = details.status;

                if order.status.is_terminal() {
                    return Err(DomainError::validation(format!(
                        "A {} order cannot be changed",
                        order.status
                    )));
                }
                if !order.status.can_transition_to(target) {
                    return Err(DomainError::validation(format!(
                        "Order status cannot move from {} to {}",
                        order.status, target
                    )));
                }
                if !order.status.accepts_edits() && !details.matches_contents(order) {
                    return Err(DomainError::validation(
                        "An order cannot be modified unless it is pending",
                    ));
                }

                let from = order.status;
                order.deliver_to = details.deliver_to;
                order.mobile_number = details.mobile_number;
                order.dishes = details.dishes;
                order.status = target;
                if from != target {
                    tracing::info!(
                        order_id = %order.id,
                        %from,
                        to = %target,
                        "order status changed"
                    );
                }
                Ok(order.clone())
            })
            .await?
            .ok_or_else(|| not_found(id))?
    }

    /// Deletes an order. Only pending orders can be deleted.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &EntityId) -> Result<Order, DomainError> {
        match self
            .store
            .remove_if(id, |order| order.status.can_delete())
            .await?
        {
            Removal::Removed(order) => {
                metrics::counter!("orders_deleted_total").increment(1);
                tracing::info!(order_id = %order.id, "order deleted");
                Ok(order)
            }
            Removal::Retained(_) => Err(DomainError::validation(
                "An order cannot be deleted unless it is pending",
            )),
            Removal::Missing => Err(not_found(id)),
        }
    }
}

fn not_found(id: &EntityId) -> DomainError {
    DomainError::NotFound(format!("Order does not exist {id}"))
}

#[cfg(test)]
mod tests {
    use entity_store::InMemoryStore;
    use serde_json::{Value, json};

    use super::*;
    use crate::order::OrderStatus;

    fn order_data(status: &str) -> Value {
        json!({
            "deliverTo": "Rick Sanchez (C-132)",
            "mobileNumber": "(202) 456-1111",
            "status": status,
            "dishes": [{ "id": "90c3d873684bf381dfab29034b5bba73", "quantity": 1 }]
        })
    }

    async fn service_with(status: &str) -> (OrderService<InMemoryStore<Order>>, Order) {
        let service = OrderService::new(InMemoryStore::new());
        let order = service
            .create(&Payload::from_data(order_data(status)))
            .await
            .unwrap();
        (service, order)
    }

    #[tokio::test]
    async fn test_create_keeps_caller_status() {
        let (service, order) = service_with("preparing").await;
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(service.get(&order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn test_update_advances_status() {
        let (service, order) = service_with("pending").await;

        let mut data = order_data("preparing");
        data["id"] = json!(order.id.as_str());
        let updated = service
            .update(&order.id, &Payload::from_data(data))
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Preparing);
        assert_eq!(service.get(&order.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_mismatched_id_leaves_order_unchanged() {
        let (service, order) = service_with("pending").await;

        let mut data = order_data("pending");
        data["id"] = json!("someone-else");
        data["deliverTo"] = json!("elsewhere");
        let err = service
            .update(&order.id, &Payload::from_data(data))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "Order id does not match route id. Order: someone-else, Route: {}.",
                order.id
            )
        );
        assert_eq!(service.get(&order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn test_update_delivered_order_rejected() {
        let (service, order) = service_with("delivered").await;
        let err = service
            .update(&order.id, &Payload::from_data(order_data("delivered")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "A delivered order cannot be changed");
    }

    #[tokio::test]
    async fn test_update_cannot_move_backwards() {
        let (service, order) = service_with("out-for-delivery").await;
        let err = service
            .update(&order.id, &Payload::from_data(order_data("pending")))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Order status cannot move from out-for-delivery to pending"
        );
    }

    #[tokio::test]
    async fn test_update_outside_pending_only_changes_status() {
        let (service, order) = service_with("preparing").await;

        let mut data = order_data("out-for-delivery");
        data["deliverTo"] = json!("elsewhere");
        let err = service
            .update(&order.id, &Payload::from_data(data))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "An order cannot be modified unless it is pending"
        );

        let updated = service
            .update(&order.id, &Payload::from_data(order_data("out-for-delivery")))
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::OutForDelivery);
    }

    #[tokio::test]
    async fn test_update_missing_order() {
        let service = OrderService::new(InMemoryStore::new());
        let err = service
            .update(&EntityId::from("nope"), &Payload::from_data(order_data("pending")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Order does not exist nope");
    }

    #[tokio::test]
    async fn test_delete_pending_order() {
        let (service, order) = service_with("pending").await;
        let deleted = service.delete(&order.id).await.unwrap();
        assert_eq!(deleted, order);
        assert!(matches!(
            service.get(&order.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_non_pending_order_rejected() {
        let (service, order) = service_with("preparing").await;
        let err = service.delete(&order.id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "An order cannot be deleted unless it is pending"
        );
        assert_eq!(service.get(&order.id).await.unwrap(), order);
    }
}
