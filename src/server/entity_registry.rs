//! Entity registry for collecting resource routes

use axum::Router;

/// Trait that describes how to build routes for a resource collection
///
/// Each entity (Dish, Order) implements this trait to contribute its
/// routes to the REST exposure.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "dish")
    fn entity_type(&self) -> &str;

    /// The collection name used in URLs (e.g., "dishes")
    fn plural(&self) -> &str;

    /// Build the routes for this collection
    ///
    /// Expected shape:
    /// - GET/POST /{plural}
    /// - GET/PUT (and DELETE where supported) /{plural}/{id}
    fn build_routes(&self) -> Router;
}

/// Registry for all resource collections of the application
///
/// Descriptors are kept in registration order. Registering an entity type
/// a second time replaces the earlier descriptor.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: Vec<Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Register an entity descriptor
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        match self
            .descriptors
            .iter()
            .position(|d| d.entity_type() == descriptor.entity_type())
        {
            Some(index) => self.descriptors[index] = descriptor,
            None => self.descriptors.push(descriptor),
        }
    }

    /// Merge the routes of every registered collection into one router
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .iter()
            .fold(Router::new(), |router, d| router.merge(d.build_routes()))
    }

    /// Registered entity types, in registration order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.entity_type()).collect()
    }

    /// Collection names, in registration order
    pub fn plurals(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.plural()).collect()
    }
}
