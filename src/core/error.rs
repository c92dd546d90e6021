//! Typed error handling for the grubdash API
//!
//! Every request-level failure is an [`ApiError`]. Each variant belongs to one
//! class of the error taxonomy and carries the exact message that is surfaced
//! to the caller:
//!
//! - [`ApiError::NotFound`]: the route identifier does not resolve (404)
//! - [`ApiError::Validation`]: a field presence, type or range check failed (400)
//! - [`ApiError::Conflict`]: the body `id` disagrees with the route id (400)
//! - [`ApiError::Lifecycle`]: the order status forbids the operation (400)
//!
//! The remaining variants belong to the request boundary (malformed body,
//! unknown path, unsupported verb) and never come out of a validation stage.
//!
//! # Example
//!
//! ```rust,ignore
//! match DishController::read(&store, "missing") {
//!     Err(ApiError::NotFound { id, .. }) => println!("no dish {}", id),
//!     Err(other) => eprintln!("{}", other),
//!     Ok(dish) => println!("{}", dish.name),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The resource collections exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Dish,
    Order,
}

impl EntityKind {
    /// Collection name used in URLs
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Dish => "dishes",
            EntityKind::Order => "orders",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Dish => f.write_str("Dish"),
            EntityKind::Order => f.write_str("Order"),
        }
    }
}

/// The main error type for request handling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Route identifier does not resolve to a stored record
    #[error("{entity} does not exist: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Payload failed a presence, type or range check
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Body id and route id disagree
    #[error("{entity} id does not match route id. {entity}: {body_id}, Route: {route_id}")]
    Conflict {
        entity: EntityKind,
        body_id: String,
        route_id: String,
    },

    /// Operation not permitted in the record's current lifecycle state
    #[error("{message}")]
    Lifecycle { message: String },

    /// Body is not a valid `{ "data": ... }` envelope
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// No route matches the requested path
    #[error("Path not found: {path}")]
    RouteNotFound { path: String },

    /// The path exists but does not accept this method
    #[error("{method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message, surfaced verbatim from the failing stage
    pub error: String,
    /// Error code for programmatic handling
    pub code: &'static str,
}

impl ApiError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn lifecycle(message: impl Into<String>) -> Self {
        ApiError::Lifecycle {
            message: message.into(),
        }
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        ApiError::InvalidBody {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::BAD_REQUEST,
            ApiError::Lifecycle { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound {
                entity: EntityKind::Dish,
                ..
            } => "DISH_NOT_FOUND",
            ApiError::NotFound {
                entity: EntityKind::Order,
                ..
            } => "ORDER_NOT_FOUND",
            ApiError::Validation { .. } => "VALIDATION_FAILED",
            ApiError::Conflict { .. } => "ID_MISMATCH",
            ApiError::Lifecycle { .. } => "LIFECYCLE_VIOLATION",
            ApiError::InvalidBody { .. } => "INVALID_BODY",
            ApiError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
            ApiError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// A specialized Result type for request handling
pub type ApiResult<T> = Result<T, ApiError>;
