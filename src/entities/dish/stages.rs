//! Validation stages for dishes
//!
//! Each stage inspects a [`DishCheck`] and either passes or returns the error
//! that ends the request. Stage order is owned by
//! [`DishController`](super::controller::DishController).

use super::model::{Dish, DishFields, DishPayload};
use crate::core::error::{ApiError, EntityKind};
use crate::core::extractors::{filled_text, supplied_id};
use crate::core::pipeline::StageResult;
use serde_json::Value;

static NO_PAYLOAD: DishPayload = DishPayload::EMPTY;

/// Input to every dish stage
#[derive(Debug, Clone, Copy)]
pub struct DishCheck<'a> {
    /// `dishId` from the route, absent on create
    pub route_id: Option<&'a str>,
    pub payload: Option<&'a DishPayload>,
    /// Record resolved from `route_id`
    pub existing: Option<&'a Dish>,
}

impl<'a> DishCheck<'a> {
    pub fn create(payload: &'a DishPayload) -> Self {
        Self {
            route_id: None,
            payload: Some(payload),
            existing: None,
        }
    }

    pub fn lookup(route_id: &'a str, existing: Option<&'a Dish>) -> Self {
        Self {
            route_id: Some(route_id),
            payload: None,
            existing,
        }
    }

    pub fn update(route_id: &'a str, payload: &'a DishPayload, existing: Option<&'a Dish>) -> Self {
        Self {
            route_id: Some(route_id),
            payload: Some(payload),
            existing,
        }
    }

    fn payload(&self) -> &'a DishPayload {
        self.payload.unwrap_or(&NO_PAYLOAD)
    }
}

/// A price is valid when it is a JSON integer greater than zero
pub fn valid_price(value: &Value) -> Option<u64> {
    value.as_u64().filter(|price| *price > 0)
}

pub fn dish_exists(check: &DishCheck<'_>) -> StageResult {
    match check.existing {
        Some(_) => Ok(()),
        None => Err(ApiError::not_found(
            EntityKind::Dish,
            check.route_id.unwrap_or_default(),
        )),
    }
}

pub fn name_exists(check: &DishCheck<'_>) -> StageResult {
    if filled_text(check.payload().name.as_ref()).is_some() {
        Ok(())
    } else {
        Err(ApiError::validation("name", "Dish must include a name"))
    }
}

pub fn description_exists(check: &DishCheck<'_>) -> StageResult {
    if filled_text(check.payload().description.as_ref()).is_some() {
        Ok(())
    } else {
        Err(ApiError::validation(
            "description",
            "Dish must include a description",
        ))
    }
}

pub fn price_exists(check: &DishCheck<'_>) -> StageResult {
    match &check.payload().price {
        None => Err(ApiError::validation("price", "Dish must include a price")),
        Some(value) if valid_price(value).is_none() => Err(ApiError::validation(
            "price",
            "Dish must have a price that is an integer greater than 0",
        )),
        Some(_) => Ok(()),
    }
}

pub fn image_exists(check: &DishCheck<'_>) -> StageResult {
    if filled_text(check.payload().image_url.as_ref()).is_some() {
        Ok(())
    } else {
        Err(ApiError::validation(
            "image_url",
            "Dish must include a image_url",
        ))
    }
}

/// An absent, null or empty body id counts as not supplied
pub fn id_matches_route(check: &DishCheck<'_>) -> StageResult {
    let route_id = check.route_id.unwrap_or_default();
    match supplied_id(check.payload().id.as_ref()) {
        Some(body_id) if body_id != route_id => Err(ApiError::Conflict {
            entity: EntityKind::Dish,
            body_id,
            route_id: route_id.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Extract the mutable fields from a payload
///
/// Fails with the field stage's error when a field rule does not hold.
pub fn extract_fields(payload: DishPayload) -> Result<DishFields, ApiError> {
    let check = DishCheck::create(&payload);
    name_exists(&check)?;
    description_exists(&check)?;
    price_exists(&check)?;
    image_exists(&check)?;

    let price = payload
        .price
        .as_ref()
        .and_then(valid_price)
        .ok_or_else(|| ApiError::validation("price", "Dish must include a price"))?;

    let text = |slot: &Option<Value>| {
        filled_text(slot.as_ref())
            .unwrap_or_default()
            .to_string()
    };
    Ok(DishFields {
        name: text(&payload.name),
        description: text(&payload.description),
        price,
        image_url: text(&payload.image_url),
    })
}
