//! Cart payload extraction from outgoing request bodies.
//!
//! The host submits its cart in three shapes depending on the code path:
//! a multipart form field named `cart`, a URL-encoded field named `cart`,
//! or a JSON body with a top-level `cart` member. All three are attempted
//! in that order; every parse failure falls through silently.

use serde::Deserialize;
use serde_json::Value;

use posinfo_core_types::ProductRecord;

use crate::RequestBody;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CartPayload {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub product: Option<ProductRecord>,
}

pub fn extract_cart(body: &RequestBody) -> Option<CartPayload> {
    match body {
        RequestBody::Multipart(fields) => fields
            .iter()
            .find(|(name, _)| name == "cart")
            .and_then(|(_, value)| payload_from_json_str(value)),
        RequestBody::Text(text) => from_urlencoded(text).or_else(|| from_json_body(text)),
        RequestBody::Empty => None,
    }
}

fn from_urlencoded(text: &str) -> Option<CartPayload> {
    url::form_urlencoded::parse(text.as_bytes())
        .find(|(name, _)| name == "cart")
        .and_then(|(_, value)| payload_from_json_str(&value))
}

fn from_json_body(text: &str) -> Option<CartPayload> {
    let value: Value = serde_json::from_str(text).ok()?;
    payload_from_value(value.get("cart")?.clone())
}

fn payload_from_json_str(raw: &str) -> Option<CartPayload> {
    serde_json::from_str(raw).ok()
}

fn payload_from_value(value: Value) -> Option<CartPayload> {
    match value {
        // Some host builds double-encode the cart as a JSON string field.
        Value::String(raw) => payload_from_json_str(&raw),
        other => serde_json::from_value(other).ok(),
    }
}
