//! API exposure over HTTP
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.

pub mod rest;

pub use rest::RestExposure;
