//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that wires:
//! - the application-scope `ServerHost` (stores + identifier source)
//! - CRUD routes for every registered collection
//! - health and fallback routes

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use host::ServerHost;
