//! Order HTTP handlers

use super::controller::OrderController;
use super::model::{Order, OrderPayload};
use crate::core::error::ApiResult;
use crate::core::extractors::{DataEnvelope, Payload};
use crate::core::id::IdentifierSource;
use crate::core::store::SharedStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

/// Order-specific AppState
#[derive(Clone)]
pub struct OrderAppState {
    pub store: SharedStore<Order>,
    pub ids: Arc<dyn IdentifierSource>,
}

pub async fn list_orders(State(state): State<OrderAppState>) -> Json<DataEnvelope<Vec<Order>>> {
    let store = state.store.read().await;
    Json(DataEnvelope::new(OrderController::list(&store)))
}

pub async fn create_order(
    State(state): State<OrderAppState>,
    Payload(payload): Payload<OrderPayload>,
) -> ApiResult<(StatusCode, Json<DataEnvelope<Order>>)> {
    let mut store = state.store.write().await;
    let order = OrderController::create(&mut store, state.ids.as_ref(), payload)?;
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(order))))
}

pub async fn get_order(
    State(state): State<OrderAppState>,
    Path(order_id): Path<String>,
) -> ApiResult<Json<DataEnvelope<Order>>> {
    let store = state.store.read().await;
    OrderController::read(&store, &order_id).map(|order| Json(DataEnvelope::new(order)))
}

pub async fn update_order(
    State(state): State<OrderAppState>,
    Path(order_id): Path<String>,
    Payload(payload): Payload<OrderPayload>,
) -> ApiResult<Json<DataEnvelope<Order>>> {
    let mut store = state.store.write().await;
    OrderController::update(&mut store, &order_id, payload)
        .map(|order| Json(DataEnvelope::new(order)))
}

pub async fn delete_order(
    State(state): State<OrderAppState>,
    Path(order_id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut store = state.store.write().await;
    OrderController::delete(&mut store, &order_id).map(|_| StatusCode::NO_CONTENT)
}
