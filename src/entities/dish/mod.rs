//! Dish entity module

pub mod controller;
pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod stages;

pub use controller::DishController;
pub use descriptor::DishDescriptor;
pub use handlers::*;
pub use model::{Dish, DishPayload};
