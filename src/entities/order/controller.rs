//! Order operations: stage order plus the terminal store operation
//!
//! Stage order per operation is part of the API contract:
//!
//! | operation | stages |
//! |-----------|--------|
//! | create    | deliverToExists, mobileNumberExists, dishesExists, dishQuantityValid |
//! | read      | orderExists |
//! | update    | orderExists, deliverToExists, mobileNumberExists, dishesExists, dishQuantityValid, statusValid, idMatchesRoute |
//! | delete    | orderExists, statusIsPending |
//!
//! Updates are accepted whatever the current status; only deletion is
//! restricted to pending orders.

use super::model::{Order, OrderPayload};
use super::stages::{self, OrderCheck};
use crate::core::error::{ApiError, ApiResult, EntityKind};
use crate::core::id::IdentifierSource;
use crate::core::pipeline::Pipeline;
use crate::core::store::RecordStore;

/// Controller for the order collection
pub struct OrderController;

impl OrderController {
    pub fn create_pipeline<'a>() -> Pipeline<OrderCheck<'a>> {
        Pipeline::new("order.create")
            .stage("deliverToExists", stages::deliver_to_exists)
            .stage("mobileNumberExists", stages::mobile_number_exists)
            .stage("dishesExists", stages::dishes_exists)
            .stage("dishQuantityValid", stages::dish_quantity_valid)
    }

    pub fn read_pipeline<'a>() -> Pipeline<OrderCheck<'a>> {
        Pipeline::new("order.read").stage("orderExists", stages::order_exists)
    }

    pub fn update_pipeline<'a>() -> Pipeline<OrderCheck<'a>> {
        Pipeline::new("order.update")
            .stage("orderExists", stages::order_exists)
            .stage("deliverToExists", stages::deliver_to_exists)
            .stage("mobileNumberExists", stages::mobile_number_exists)
            .stage("dishesExists", stages::dishes_exists)
            .stage("dishQuantityValid", stages::dish_quantity_valid)
            .stage("statusValid", stages::status_valid)
            .stage("idMatchesRoute", stages::id_matches_route)
    }

    pub fn delete_pipeline<'a>() -> Pipeline<OrderCheck<'a>> {
        Pipeline::new("order.delete")
            .stage("orderExists", stages::order_exists)
            .stage("statusIsPending", stages::status_is_pending)
    }

    /// Full collection, insertion order, no filtering
    pub fn list(store: &RecordStore<Order>) -> Vec<Order> {
        store.list().cloned().collect()
    }

    pub fn create(
        store: &mut RecordStore<Order>,
        ids: &dyn IdentifierSource,
        payload: OrderPayload,
    ) -> ApiResult<Order> {
        Self::create_pipeline().run(&OrderCheck::create(&payload))?;

        let fields = stages::extract_fields(payload)?;
        let order = store.append_new(ids, |id| fields.into_order(id)).clone();
        tracing::info!(order_id = %order.id, dishes = order.dishes.len(), "order created");
        Ok(order)
    }

    pub fn read(store: &RecordStore<Order>, order_id: &str) -> ApiResult<Order> {
        let existing = store.find_by_id(order_id);
        Self::read_pipeline().run(&OrderCheck::lookup(order_id, existing))?;
        existing
            .cloned()
            .ok_or_else(|| ApiError::not_found(EntityKind::Order, order_id))
    }

    pub fn update(
        store: &mut RecordStore<Order>,
        order_id: &str,
        payload: OrderPayload,
    ) -> ApiResult<Order> {
        Self::update_pipeline().run(&OrderCheck::update(
            order_id,
            &payload,
            store.find_by_id(order_id),
        ))?;

        let status = stages::requested_status(&payload)?;
        let fields = stages::extract_fields(payload)?;
        let updated = store
            .update_in_place(order_id, |order| fields.apply_to(order, status))
            .cloned()
            .ok_or_else(|| ApiError::not_found(EntityKind::Order, order_id))?;

        tracing::info!(order_id = %updated.id, status = %updated.status, "order updated");
        Ok(updated)
    }

    /// Remove a pending order
    pub fn delete(store: &mut RecordStore<Order>, order_id: &str) -> ApiResult<()> {
        Self::delete_pipeline().run(&OrderCheck::lookup(order_id, store.find_by_id(order_id)))?;

        store.remove(order_id);
        tracing::info!(order_id = %order_id, "order deleted");
        Ok(())
    }

    /// Check a stored order (e.g. seed data) against the create rules
    pub fn validate_record(order: &Order) -> ApiResult<()> {
        let payload = OrderPayload::try_from(order)
            .map_err(|e| ApiError::invalid_body(e.to_string()))?;
        Self::create_pipeline().run(&OrderCheck::create(&payload))
    }
}
