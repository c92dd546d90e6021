//! Order record, line items, status lifecycle and request payload

use crate::core::store::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Order status lifecycle
///
/// New orders start `pending`. Transitions are only ever requested through an
/// update; deletion is allowed from `pending` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_deletable(&self) -> bool {
        *self == OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`OrderStatus`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One (dish reference, quantity) pair in an order
///
/// `dishId` is a weak reference: it is never resolved against the dish store
/// and is kept as whatever JSON value the client sent. Any other fields the client attached (a name or price snapshot) are kept
/// verbatim so the order reads back as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishLineItem {
    #[serde(rename = "dishId", default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<Value>,
    pub quantity: u32,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl DishLineItem {
    pub fn new(dish_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            dish_id: Some(Value::String(dish_id.into())),
            quantity,
            details: Map::new(),
        }
    }

    /// Line item from one element of a request's `dishes` array
    ///
    /// `None` unless the element is an object whose `quantity` is a
    /// non-negative integer that fits in `u32`.
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(mut details) = value else {
            return None;
        };
        let quantity = details
            .remove("quantity")?
            .as_u64()
            .and_then(|q| u32::try_from(q).ok())?;
        let dish_id = details.remove("dishId").filter(|id| !id.is_null());
        Some(Self {
            dish_id,
            quantity,
            details,
        })
    }
}

/// A customer order
///
/// `dishes` is never empty and every quantity is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub dishes: Vec<DishLineItem>,
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /orders` and `PUT /orders/{orderId}`
///
/// Every slot stays a raw JSON value. The stages tell an absent list from a
/// non-list or an empty one, point at the offending line item, and report a
/// mistyped text field with that field's own message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub deliver_to: Option<Value>,
    #[serde(default)]
    pub mobile_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default)]
    pub dishes: Option<Value>,
}

impl OrderPayload {
    pub const EMPTY: OrderPayload = OrderPayload {
        id: None,
        deliver_to: None,
        mobile_number: None,
        status: None,
        dishes: None,
    };
}

impl TryFrom<&Order> for OrderPayload {
    type Error = serde_json::Error;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(Value::from(order.id.as_str())),
            deliver_to: Some(Value::from(order.deliver_to.as_str())),
            mobile_number: Some(Value::from(order.mobile_number.as_str())),
            status: Some(Value::from(order.status.as_str())),
            dishes: Some(serde_json::to_value(&order.dishes)?),
        })
    }
}

/// The mutable fields of an order, extracted from a payload that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFields {
    pub deliver_to: String,
    pub mobile_number: String,
    pub dishes: Vec<DishLineItem>,
}

impl OrderFields {
    /// New orders always start pending
    pub fn into_order(self, id: String) -> Order {
        Order {
            id,
            deliver_to: self.deliver_to,
            mobile_number: self.mobile_number,
            status: OrderStatus::Pending,
            dishes: self.dishes,
        }
    }

    /// Overwrite every mutable field; the id is left untouched
    pub fn apply_to(self, order: &mut Order, status: OrderStatus) {
        order.deliver_to = self.deliver_to;
        order.mobile_number = self.mobile_number;
        order.dishes = self.dishes;
        order.status = status;
    }
}
