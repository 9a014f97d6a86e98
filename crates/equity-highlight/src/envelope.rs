//! Response envelope checks for the securities web services.
//!
//! Both lookups answer with `{ "data": { "items": [ ... ] } }`. A payload is
//! only dereferenced after [`validate_response`] accepts the envelope.

use serde_json::Value;

/// Returns `true` when the envelope carries a usable payload.
///
/// A usable envelope has a non-empty `data.items` array, no non-null
/// top-level `error` and, when a top-level `success` flag is present, a flag
/// equal to `true`.
pub fn validate_response(envelope: &Value) -> bool {
    if envelope.get("error").is_some_and(|error| !error.is_null()) {
        return false;
    }

    if let Some(success) = envelope.get("success") {
        if success.as_bool() != Some(true) {
            return false;
        }
    }

    envelope
        .get("data")
        .and_then(|data| data.get("items"))
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

/// First item of a valid envelope.
pub fn first_item(envelope: &Value) -> Option<&Value> {
    if !validate_response(envelope) {
        return None;
    }
    envelope.pointer("/data/items/0")
}
