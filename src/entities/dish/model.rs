//! Dish record and request payload

use crate::core::store::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dish on the menu
///
/// Every stored dish has all five fields populated and a strictly positive
/// price. `id` is never reassigned after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl Record for Dish {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /dishes` and `PUT /dishes/{dishId}`
///
/// Every slot stays a raw JSON value: a wrong type is reported by the stage
/// owning the field, never by the body parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DishPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub image_url: Option<Value>,
}

impl DishPayload {
    pub const EMPTY: DishPayload = DishPayload {
        id: None,
        name: None,
        description: None,
        price: None,
        image_url: None,
    };
}

impl From<&Dish> for DishPayload {
    fn from(dish: &Dish) -> Self {
        Self {
            id: Some(Value::from(dish.id.as_str())),
            name: Some(Value::from(dish.name.as_str())),
            description: Some(Value::from(dish.description.as_str())),
            price: Some(Value::from(dish.price)),
            image_url: Some(Value::from(dish.image_url.as_str())),
        }
    }
}

/// The mutable fields of a dish, extracted from a payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishFields {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl DishFields {
    pub fn into_dish(self, id: String) -> Dish {
        Dish {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
        }
    }

    /// Overwrite every mutable field; the id is left untouched
    pub fn apply_to(self, dish: &mut Dish) {
        dish.name = self.name;
        dish.description = self.description;
        dish.price = self.price;
        dish.image_url = self.image_url;
    }
}
