//! Entity descriptor for Dish

use super::handlers::{DishAppState, create_dish, get_dish, list_dishes, update_dish};
use super::model::Dish;
use crate::core::error::EntityKind;
use crate::core::id::IdentifierSource;
use crate::core::store::SharedStore;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::exposure::rest::method_not_allowed;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Dish entity
///
/// Dishes are never deleted; `DELETE /dishes/{dishId}` answers 405.
pub struct DishDescriptor {
    pub store: SharedStore<Dish>,
    pub ids: Arc<dyn IdentifierSource>,
}

impl DishDescriptor {
    pub fn new(store: SharedStore<Dish>, ids: Arc<dyn IdentifierSource>) -> Self {
        Self { store, ids }
    }
}

impl EntityDescriptor for DishDescriptor {
    fn entity_type(&self) -> &str {
        "dish"
    }

    fn plural(&self) -> &str {
        EntityKind::Dish.plural()
    }

    fn build_routes(&self) -> Router {
        let state = DishAppState {
            store: self.store.clone(),
            ids: self.ids.clone(),
        };

        Router::new()
            .route(
                "/dishes",
                get(list_dishes)
                    .post(create_dish)
                    .fallback(method_not_allowed),
            )
            .route(
                "/dishes/{dish_id}",
                get(get_dish).put(update_dish).fallback(method_not_allowed),
            )
            .with_state(state)
    }
}
