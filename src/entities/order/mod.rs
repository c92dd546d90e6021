//! Order entity module

pub mod controller;
pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod stages;

pub use controller::OrderController;
pub use descriptor::OrderDescriptor;
pub use handlers::*;
pub use model::{DishLineItem, Order, OrderPayload, OrderStatus};
