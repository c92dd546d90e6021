//! Axum extractors and wrappers for the `{ "data": ... }` envelope
//!
//! Every create/update body is wrapped as `{ "data": { ...fields } }` and
//! every successful response is wrapped the same way. [`Payload`] unwraps the
//! request side into a typed request struct before any validation stage sees
//! it; [`DataEnvelope`] wraps the response side.

use crate::core::error::ApiError;
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "data": T }` on the wire
///
/// A missing `data` key deserializes to `T::default()`, so the first field
/// stage reports the first missing field instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Extractor for enveloped request bodies
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_dish(
///     State(state): State<DishAppState>,
///     Payload(payload): Payload<DishPayload>,
/// ) -> ApiResult<(StatusCode, Json<DataEnvelope<Dish>>)> {
///     // payload is the typed content of `data`
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<DataEnvelope<T>>::from_request(req, state).await {
            Ok(Json(envelope)) => Ok(Payload(envelope.data)),
            Err(rejection) => Err(ApiError::invalid_body(rejection.body_text())),
        }
    }
}

/// The text of a payload slot, when it holds a non-empty JSON string
pub fn filled_text(slot: Option<&Value>) -> Option<&str> {
    slot.and_then(Value::as_str).filter(|text| !text.is_empty())
}

/// The `id` a client put in a body, as text
///
/// Absent, `null` and `""` count as not supplied. Any other non-string value
/// is rendered as its JSON text so it can be compared with the route id.
pub fn supplied_id(slot: Option<&Value>) -> Option<String> {
    match slot? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
