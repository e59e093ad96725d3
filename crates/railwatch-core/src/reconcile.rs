//! Reconciliation of raw feed payloads into [`LiveState`].
//!
//! The feed is upstream of us and occasionally wrong: collections arrive
//! with the wrong type, records miss fields, elements are not even objects.
//! Reconciliation never fails. A wrong-typed collection becomes empty, a
//! malformed element is skipped with a warning, and field-level repair is
//! handled by the lenient deserializers on the `live` types.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::live::{LiveState, WeatherReport};

/// Decodes one `/api/trains/active` payload, repairing what it can.
pub fn reconcile(payload: &Value) -> LiveState {
    LiveState {
        trains: decode_seq(payload.get("trains"), "train"),
        alerts: decode_seq(payload.get("alerts"), "alert"),
        weather: decode_weather(payload.get("weather")),
    }
}

fn decode_seq<T: DeserializeOwned>(value: Option<&Value>, what: &str) -> Vec<T> {
    match value.and_then(Value::as_array) {
        Some(items) => decode_elements(items, what),
        None => Vec::new(),
    }
}

/// Decodes each element independently so one bad entry cannot take down its
/// siblings.
pub(crate) fn decode_elements<T: DeserializeOwned>(items: &[Value], what: &str) -> Vec<T> {
    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value(item.clone()) {
            Ok(element) => decoded.push(element),
            Err(err) => {
                tracing::warn!("skipping malformed {what} at index {index}: {err}");
            }
        }
    }
    decoded
}

fn decode_weather(value: Option<&Value>) -> WeatherReport {
    match value {
        Some(v) if v.is_object() => serde_json::from_value(v.clone()).unwrap_or_default(),
        _ => WeatherReport::default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
