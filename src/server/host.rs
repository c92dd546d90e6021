//! Application-scope context shared by every handler
//!
//! The host owns one [`RecordStore`] per entity type and the identifier
//! source. It is built once at startup and handed to the entity descriptors,
//! which pass clones of the shared handles to their handlers.

use crate::config::{ConfigError, SeedData};
use crate::core::error::ApiResult;
use crate::core::id::{IdentifierSource, RandomIdSource};
use crate::core::store::{Record, RecordStore, SharedStore};
use crate::entities::{
    Dish, DishController, DishDescriptor, Order, OrderController, OrderDescriptor,
};
use crate::server::entity_registry::EntityRegistry;
use std::sync::Arc;

/// Host context containing all application state
pub struct ServerHost {
    pub dishes: SharedStore<Dish>,
    pub orders: SharedStore<Order>,
    pub ids: Arc<dyn IdentifierSource>,
}

impl ServerHost {
    /// Empty stores and the given identifier source
    pub fn new(ids: Arc<dyn IdentifierSource>) -> Self {
        Self {
            dishes: RecordStore::new().shared(),
            orders: RecordStore::new().shared(),
            ids,
        }
    }

    /// Stores pre-populated from seed data
    ///
    /// Each record must pass the create rules of its collection and ids must
    /// be unique within a collection.
    pub fn with_seed(ids: Arc<dyn IdentifierSource>, seed: SeedData) -> Result<Self, ConfigError> {
        let dishes = seed_store(seed.dishes, "dish", DishController::validate_record)?;
        let orders = seed_store(seed.orders, "order", OrderController::validate_record)?;

        tracing::info!(
            dishes = dishes.len(),
            orders = orders.len(),
            "seed data loaded"
        );

        Ok(Self {
            dishes: dishes.shared(),
            orders: orders.shared(),
            ids,
        })
    }

    /// Registry with a descriptor for every collection
    pub fn entity_registry(&self) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(DishDescriptor::new(
            self.dishes.clone(),
            self.ids.clone(),
        )));
        registry.register(Box::new(OrderDescriptor::new(
            self.orders.clone(),
            self.ids.clone(),
        )));
        registry
    }
}

impl Default for ServerHost {
    fn default() -> Self {
        Self::new(Arc::new(RandomIdSource))
    }
}

fn seed_store<T, V>(
    records: Vec<T>,
    entity: &'static str,
    validate: V,
) -> Result<RecordStore<T>, ConfigError>
where
    T: Record,
    V: Fn(&T) -> ApiResult<()>,
{
    let mut store = RecordStore::new();

    for record in records {
        let id = record.id().to_string();
        validate(&record).map_err(|e| ConfigError::InvalidSeed {
            entity,
            id: id.clone(),
            message: e.to_string(),
        })?;
        if store.append(record).is_none() {
            return Err(ConfigError::DuplicateSeedId { entity, id });
        }
    }

    Ok(store)
}
