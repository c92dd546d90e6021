//! Entity descriptor for Order

use super::handlers::{
    OrderAppState, create_order, delete_order, get_order, list_orders, update_order,
};
use super::model::Order;
use crate::core::error::EntityKind;
use crate::core::id::IdentifierSource;
use crate::core::store::SharedStore;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::exposure::rest::method_not_allowed;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Order entity
pub struct OrderDescriptor {
    pub store: SharedStore<Order>,
    pub ids: Arc<dyn IdentifierSource>,
}

impl OrderDescriptor {
    pub fn new(store: SharedStore<Order>, ids: Arc<dyn IdentifierSource>) -> Self {
        Self { store, ids }
    }
}

impl EntityDescriptor for OrderDescriptor {
    fn entity_type(&self) -> &str {
        "order"
    }

    fn plural(&self) -> &str {
        EntityKind::Order.plural()
    }

    fn build_routes(&self) -> Router {
        let state = OrderAppState {
            store: self.store.clone(),
            ids: self.ids.clone(),
        };

        Router::new()
            .route(
                "/orders",
                get(list_orders)
                    .post(create_order)
                    .fallback(method_not_allowed),
            )
            .route(
                "/orders/{order_id}",
                get(get_order)
                    .put(update_order)
                    .delete(delete_order)
                    .fallback(method_not_allowed),
            )
            .with_state(state)
    }
}
