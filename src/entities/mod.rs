//! Resource collections exposed by the API

pub mod dish;
pub mod order;

pub use dish::{Dish, DishController, DishDescriptor, DishPayload};
pub use order::{DishLineItem, Order, OrderController, OrderDescriptor, OrderPayload, OrderStatus};
