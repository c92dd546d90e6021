//! Dish HTTP handlers

use super::controller::DishController;
use super::model::{Dish, DishPayload};
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

/// Dish-specific AppState
#[derive(Clone)]
pub struct DishAppState {
    pub store: SharedStore<Dish>,
    pub ids: Arc<dyn IdentifierSource>,
}

pub async fn list_dishes(State(state): State<DishAppState>) -> Json<DataEnvelope<Vec<Dish>>> {
    let store = state.store.read().await;
    Json(DataEnvelope::new(DishController::list(&store)))
}

pub async fn create_dish(
    State(state): State<DishAppState>,
    Payload(payload): Payload<DishPayload>,
) -> ApiResult<(StatusCode, Json<DataEnvelope<Dish>>)> {
    let mut store = state.store.write().await;
    let dish = DishController::create(&mut store, state.ids.as_ref(), payload)?;
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(dish))))
}

pub async fn get_dish(
    State(state): State<DishAppState>,
    Path(dish_id): Path<String>,
) -> ApiResult<Json<DataEnvelope<Dish>>> {
    let store = state.store.read().await;
    DishController::read(&store, &dish_id).map(|dish| Json(DataEnvelope::new(dish)))
}

pub async fn update_dish(
    State(state): State<DishAppState>,
    Path(dish_id): Path<String>,
    Payload(payload): Payload<DishPayload>,
) -> ApiResult<Json<DataEnvelope<Dish>>> {
    let mut store = state.store.write().await;
    DishController::update(&mut store, &dish_id, payload).map(|dish| Json(DataEnvelope::new(dish)))
}
