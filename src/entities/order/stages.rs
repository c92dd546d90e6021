//! Validation stages for orders
//!
//! Field stages are shared by create and update. `statusValid` and
//! `idMatchesRoute` only run on update; `statusIsPending` only on delete.

use super::model::{DishLineItem, Order, OrderFields, OrderPayload, OrderStatus};
use crate::core::error::{ApiError, EntityKind};
use crate::core::extractors::{filled_text, supplied_id};
use crate::core::pipeline::StageResult;
use serde_json::Value;

static NO_PAYLOAD: OrderPayload = OrderPayload::EMPTY;

const STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered, cancelled";

/// Input to every order stage
#[derive(Debug, Clone, Copy)]
pub struct OrderCheck<'a> {
    /// `orderId` from the route, absent on create
    pub route_id: Option<&'a str>,
    pub payload: Option<&'a OrderPayload>,
    /// Record resolved from `route_id`
    pub existing: Option<&'a Order>,
}

impl<'a> OrderCheck<'a> {
    pub fn create(payload: &'a OrderPayload) -> Self {
        Self {
            route_id: None,
            payload: Some(payload),
            existing: None,
        }
    }

    pub fn lookup(route_id: &'a str, existing: Option<&'a Order>) -> Self {
        Self {
            route_id: Some(route_id),
            payload: None,
            existing,
        }
    }

    pub fn update(
        route_id: &'a str,
        payload: &'a OrderPayload,
        existing: Option<&'a Order>,
    ) -> Self {
        Self {
            route_id: Some(route_id),
            payload: Some(payload),
            existing,
        }
    }

    fn payload(&self) -> &'a OrderPayload {
        self.payload.unwrap_or(&NO_PAYLOAD)
    }
}

/// A quantity is valid when it is a JSON integer of at least 1
pub fn valid_quantity(value: &Value) -> Option<u32> {
    value
        .as_u64()
        .and_then(|q| u32::try_from(q).ok())
        .filter(|q| *q >= 1)
}

pub fn order_exists(check: &OrderCheck<'_>) -> StageResult {
    match check.existing {
        Some(_) => Ok(()),
        None => Err(ApiError::not_found(
            EntityKind::Order,
            check.route_id.unwrap_or_default(),
        )),
    }
}

pub fn deliver_to_exists(check: &OrderCheck<'_>) -> StageResult {
    if filled_text(check.payload().deliver_to.as_ref()).is_some() {
        Ok(())
    } else {
        Err(ApiError::validation(
            "deliverTo",
            "Order must include a deliverTo",
        ))
    }
}

pub fn mobile_number_exists(check: &OrderCheck<'_>) -> StageResult {
    if filled_text(check.payload().mobile_number.as_ref()).is_some() {
        Ok(())
    } else {
        Err(ApiError::validation(
            "mobileNumber",
            "Order must include a mobileNumber",
        ))
    }
}

pub fn dishes_exists(check: &OrderCheck<'_>) -> StageResult {
    match &check.payload().dishes {
        None => Err(ApiError::validation("dishes", "Order must include a dish")),
        Some(Value::Array(items)) if !items.is_empty() => Ok(()),
        Some(_) => Err(ApiError::validation(
            "dishes",
            "Order must include at least one dish",
        )),
    }
}

/// Reports the first line item whose quantity is missing or not a positive integer
pub fn dish_quantity_valid(check: &OrderCheck<'_>) -> StageResult {
    let Some(Value::Array(items)) = &check.payload().dishes else {
        return Ok(());
    };

    match items
        .iter()
        .position(|item| item.get("quantity").and_then(valid_quantity).is_none())
    {
        Some(index) => Err(ApiError::validation(
            "dishes",
            format!(
                "Dish {} must have a quantity that is an integer greater than 0",
                index
            ),
        )),
        None => Ok(()),
    }
}

pub fn status_valid(check: &OrderCheck<'_>) -> StageResult {
    match check.payload().status.as_ref().and_then(Value::as_str) {
        Some(status) if status.parse::<OrderStatus>().is_ok() => Ok(()),
        _ => Err(ApiError::lifecycle(STATUS_MESSAGE)),
    }
}

/// An absent, null or empty body id counts as not supplied
pub fn id_matches_route(check: &OrderCheck<'_>) -> StageResult {
    let route_id = check.route_id.unwrap_or_default();
    match supplied_id(check.payload().id.as_ref()) {
        Some(body_id) if body_id != route_id => Err(ApiError::Conflict {
            entity: EntityKind::Order,
            body_id,
            route_id: route_id.to_string(),
        }),
        _ => Ok(()),
    }
}

pub fn status_is_pending(check: &OrderCheck<'_>) -> StageResult {
    match check.existing {
        Some(order) if !order.status.is_deletable() => Err(ApiError::lifecycle(
            "An order cannot be deleted unless it is pending",
        )),
        _ => Ok(()),
    }
}

/// Extract the mutable fields from a payload
///
/// Fails with the field stage's error when a field rule does not hold.
/// Once `dishQuantityValid` has passed every line item converts.
pub fn extract_fields(payload: OrderPayload) -> Result<OrderFields, ApiError> {
    let check = OrderCheck::create(&payload);
    deliver_to_exists(&check)?;
    mobile_number_exists(&check)?;
    dishes_exists(&check)?;
    dish_quantity_valid(&check)?;

    let text = |slot: &Option<Value>| {
        filled_text(slot.as_ref())
            .unwrap_or_default()
            .to_string()
    };
    let deliver_to = text(&payload.deliver_to);
    let mobile_number = text(&payload.mobile_number);

    let dishes = match payload.dishes {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(DishLineItem::from_json)
            .collect(),
        _ => Vec::new(),
    };

    Ok(OrderFields {
        deliver_to,
        mobile_number,
        dishes,
    })
}

/// Status requested by an update payload
pub fn requested_status(payload: &OrderPayload) -> Result<OrderStatus, ApiError> {
    payload
        .status
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ApiError::lifecycle(STATUS_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> OrderPayload {
        serde_json::from_value(value).unwrap()
    }

    fn full() -> Value {
        json!({
            "deliverTo": "308 Negra Arroyo Lane",
            "mobileNumber": "(505) 143-3369",
            "dishes": [{ "dishId": "d1", "quantity": 2 }]
        })
    }

    fn stored(status: OrderStatus) -> Order {
        Order {
            id: "o1".to_string(),
            deliver_to: "a".to_string(),
            mobile_number: "b".to_string(),
            status,
            dishes: vec![DishLineItem::new("d1", 1)],
        }
    }

    fn message(result: StageResult) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_full_payload_passes_field_stages() {
        let p = payload(full());
        let check = OrderCheck::create(&p);
        assert!(deliver_to_exists(&check).is_ok());
        assert!(mobile_number_exists(&check).is_ok());
        assert!(dishes_exists(&check).is_ok());
        assert!(dish_quantity_valid(&check).is_ok());
    }

    #[test]
    fn test_missing_text_fields() {
        let p = payload(json!({ "deliverTo": "", "mobileNumber": 5551234 }));
        assert_eq!(
            message(deliver_to_exists(&OrderCheck::create(&p))),
            "Order must include a deliverTo"
        );
        assert_eq!(
            message(mobile_number_exists(&OrderCheck::create(&p))),
            "Order must include a mobileNumber"
        );
    }

    #[test]
    fn test_dishes_absent_vs_empty() {
        let p = payload(json!({}));
        assert_eq!(
            message(dishes_exists(&OrderCheck::create(&p))),
            "Order must include a dish"
        );

        let p = payload(json!({ "dishes": [] }));
        assert_eq!(
            message(dishes_exists(&OrderCheck::create(&p))),
            "Order must include at least one dish"
        );

        let p = payload(json!({ "dishes": "pasta" }));
        assert_eq!(
            message(dishes_exists(&OrderCheck::create(&p))),
            "Order must include at least one dish"
        );
    }

    #[test]
    fn test_quantity_names_offending_index() {
        let p = payload(json!({ "dishes": [{ "quantity": 0 }] }));
        assert_eq!(
            message(dish_quantity_valid(&OrderCheck::create(&p))),
            "Dish 0 must have a quantity that is an integer greater than 0"
        );

        let p = payload(json!({
            "dishes": [{ "quantity": 1 }, { "quantity": 2 }, { "quantity": "2" }]
        }));
        assert_eq!(
            message(dish_quantity_valid(&OrderCheck::create(&p))),
            "Dish 2 must have a quantity that is an integer greater than 0"
        );

        for bad in [json!({}), json!({ "quantity": -1 }), json!({ "quantity": 1.5 }), json!(3)] {
            let p = payload(json!({ "dishes": [bad] }));
            assert!(dish_quantity_valid(&OrderCheck::create(&p)).is_err());
        }
    }

    #[test]
    fn test_status_valid() {
        for status in OrderStatus::ALL {
            let p = payload(json!({ "status": status.as_str() }));
            assert!(status_valid(&OrderCheck::create(&p)).is_ok());
        }

        for bad in [
            json!({ "status": "invalid" }),
            json!({ "status": "" }),
            json!({ "status": 1 }),
            json!({}),
        ] {
            let p = payload(bad);
            let err = status_valid(&OrderCheck::create(&p)).unwrap_err();
            assert!(matches!(err, ApiError::Lifecycle { .. }));
        }
    }

    #[test]
    fn test_id_matches_route() {
        let p = payload(json!({ "id": "o1" }));
        assert!(id_matches_route(&OrderCheck::update("o1", &p, None)).is_ok());

        let p = payload(json!({ "id": "" }));
        assert!(id_matches_route(&OrderCheck::update("o1", &p, None)).is_ok());

        let p = payload(json!({ "id": null }));
        assert!(id_matches_route(&OrderCheck::update("o1", &p, None)).is_ok());

        let p = payload(json!({ "id": "o2" }));
        assert_eq!(
            message(id_matches_route(&OrderCheck::update("o1", &p, None))),
            "Order id does not match route id. Order: o2, Route: o1"
        );
    }

    #[test]
    fn test_order_exists() {
        let order = stored(OrderStatus::Pending);
        assert!(order_exists(&OrderCheck::lookup("o1", Some(&order))).is_ok());
        assert_eq!(
            order_exists(&OrderCheck::lookup("zz", None)).unwrap_err(),
            ApiError::not_found(EntityKind::Order, "zz")
        );
    }

    #[test]
    fn test_status_is_pending() {
        let pending = stored(OrderStatus::Pending);
        assert!(status_is_pending(&OrderCheck::lookup("o1", Some(&pending))).is_ok());

        for status in [
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let order = stored(status);
            assert_eq!(
                message(status_is_pending(&OrderCheck::lookup("o1", Some(&order)))),
                "An order cannot be deleted unless it is pending"
            );
        }
    }

    #[test]
    fn test_extract_fields() {
        let fields = extract_fields(payload(full())).unwrap();
        assert_eq!(fields.deliver_to, "308 Negra Arroyo Lane");
        assert_eq!(fields.dishes, vec![DishLineItem::new("d1", 2)]);

        let fields = extract_fields(payload(json!({
            "deliverTo": "a",
            "mobileNumber": "b",
            "dishes": [{ "dishId": 7, "quantity": 1 }]
        })))
        .unwrap();
        assert_eq!(fields.dishes[0].dish_id, Some(json!(7)));
        assert_eq!(fields.dishes[0].quantity, 1);

        let err = extract_fields(payload(json!({
            "deliverTo": "a",
            "mobileNumber": "b",
            "dishes": [{ "quantity": 0 }]
        })))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "dishes", .. }));
    }

    #[test]
    fn test_requested_status() {
        let p = payload(json!({ "status": "delivered" }));
        assert_eq!(requested_status(&p), Ok(OrderStatus::Delivered));
        assert!(requested_status(&payload(json!({}))).is_err());
    }
}
