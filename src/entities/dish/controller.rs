//! Dish operations: stage order plus the terminal store operation
//!
//! Stage order per operation is part of the API contract:
//!
//! | operation | stages                                                                    |
//! |-----------|---------------------------------------------------------------------------|
//! | create    | nameExists, descriptionExists, priceExists, imageExists                   |
//! | read      | dishExists                                                                |
//! | update    | dishExists, nameExists, descriptionExists, priceExists, imageExists, idMatchesRoute |

use super::model::{Dish, DishPayload};
use super::stages::{self, DishCheck};
use crate::core::error::{ApiError, ApiResult, EntityKind};
use crate::core::id::IdentifierSource;
use crate::core::pipeline::Pipeline;
use crate::core::store::RecordStore;

/// Controller for the dish collection
pub struct DishController;

impl DishController {
    pub fn create_pipeline<'a>() -> Pipeline<DishCheck<'a>> {
        Pipeline::new("dish.create")
            .stage("nameExists", stages::name_exists)
            .stage("descriptionExists", stages::description_exists)
            .stage("priceExists", stages::price_exists)
            .stage("imageExists", stages::image_exists)
    }

    pub fn read_pipeline<'a>() -> Pipeline<DishCheck<'a>> {
        Pipeline::new("dish.read").stage("dishExists", stages::dish_exists)
    }

    pub fn update_pipeline<'a>() -> Pipeline<DishCheck<'a>> {
        Pipeline::new("dish.update")
            .stage("dishExists", stages::dish_exists)
            .stage("nameExists", stages::name_exists)
            .stage("descriptionExists", stages::description_exists)
            .stage("priceExists", stages::price_exists)
            .stage("imageExists", stages::image_exists)
            .stage("idMatchesRoute", stages::id_matches_route)
    }

    /// Full collection, insertion order, no filtering
    pub fn list(store: &RecordStore<Dish>) -> Vec<Dish> {
        store.list().cloned().collect()
    }

    pub fn create(
        store: &mut RecordStore<Dish>,
        ids: &dyn IdentifierSource,
        payload: DishPayload,
    ) -> ApiResult<Dish> {
        Self::create_pipeline().run(&DishCheck::create(&payload))?;

        let fields = stages::extract_fields(payload)?;
        let dish = store.append_new(ids, |id| fields.into_dish(id)).clone();
        tracing::info!(dish_id = %dish.id, "dish created");
        Ok(dish)
    }

    pub fn read(store: &RecordStore<Dish>, dish_id: &str) -> ApiResult<Dish> {
        let existing = store.find_by_id(dish_id);
        Self::read_pipeline().run(&DishCheck::lookup(dish_id, existing))?;
        existing
            .cloned()
            .ok_or_else(|| ApiError::not_found(EntityKind::Dish, dish_id))
    }

    pub fn update(
        store: &mut RecordStore<Dish>,
        dish_id: &str,
        payload: DishPayload,
    ) -> ApiResult<Dish> {
        Self::update_pipeline().run(&DishCheck::update(
            dish_id,
            &payload,
            store.find_by_id(dish_id),
        ))?;

        let fields = stages::extract_fields(payload)?;
        let updated = store
            .update_in_place(dish_id, |dish| fields.apply_to(dish))
            .cloned()
            .ok_or_else(|| ApiError::not_found(EntityKind::Dish, dish_id))?;

        tracing::info!(dish_id = %updated.id, "dish updated");
        Ok(updated)
    }

    /// Check a stored dish (e.g. seed data) against the create rules
    pub fn validate_record(dish: &Dish) -> ApiResult<()> {
        let payload = DishPayload::from(dish);
        Self::create_pipeline().run(&DishCheck::create(&payload))
    }
}
