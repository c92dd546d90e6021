//! # GrubDash
//!
//! A REST API for a food-delivery menu (`/dishes`) and its orders (`/orders`).
//!
//! ## Features
//!
//! - **Validation pipelines**: every request runs an ordered list of named
//!   stages; the first failing stage decides the response
//! - **Order lifecycle**: new orders start `pending`; only pending orders can
//!   be deleted
//! - **Uniform envelopes**: bodies are `{ "data": ... }`, errors are
//!   `{ "error": "...", "code": "..." }`
//! - **In-memory stores**: insertion-ordered, shared behind an async lock
//! - **YAML configuration**: listener, log filter and seed data, with
//!   `GRUBDASH_*` environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grubdash::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_id_source(SequentialIdSource::new())
//!         .serve("127.0.0.1:5000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, ApiResult, EntityKind, ErrorResponse},
        extractors::{DataEnvelope, Payload},
        id::{IdentifierSource, RandomIdSource, SequentialIdSource},
        pipeline::{Pipeline, StageResult},
        store::{Record, RecordStore, SharedStore},
    };

    // === Entities ===
    pub use crate::entities::{
        Dish, DishController, DishLineItem, DishPayload, Order, OrderController, OrderPayload,
        OrderStatus,
    };

    // === Config ===
    pub use crate::config::{AppConfig, ConfigError, SeedData};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        routing::{delete, get, post, put},
    };
}
