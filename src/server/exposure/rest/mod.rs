//! REST API exposure
//!
//! Merges the routes every entity descriptor contributes, adds the health
//! check, and answers unknown paths and unsupported verbs with the same
//! JSON error body the validation stages use.

use super::super::host::ServerHost;
use crate::core::error::ApiError;
use anyhow::Result;
use axum::http::{Method, Uri};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host owning the stores and identifier source
    /// * `custom_routes` - Additional routes to merge
    ///
    /// # Returns
    ///
    /// A router with the health check, the dish and order collections,
    /// the custom routes and a JSON 404 fallback, wrapped in a trace layer.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let registry = host.entity_registry();
        tracing::debug!(collections = ?registry.plurals(), "building REST routes");

        let mut app = Self::health_routes().merge(registry.build_routes());

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .fallback(route_not_found)
            .layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new().route("/health", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "grubdash"
        }))
    }
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Fallback for paths no collection serves
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        path: uri.path().to_string(),
    }
}
