//! Recovery of the JSON payload from a raw inbound body.
//!
//! Gateways and senders wrap the document of interest in different ways, so
//! recovery is an ordered list of pure strategies where the first one that
//! yields a JSON object wins. Only objects count; arrays, scalars and `null`
//! are treated as failures.

use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

/// A named recovery strategy
pub type Strategy = (&'static str, fn(&str) -> Option<JsonObject>);

/// Strategies in precedence order
pub const STRATEGIES: &[Strategy] = &[
    ("proxy_wrapped", unwrap_proxy_body),
    ("direct", parse_object),
    ("quoted", parse_quoted_object),
];

/// Payload recovered from a raw body, with the strategy that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub strategy: &'static str,
    pub payload: JsonObject,
}

/// Run the strategies in order; `None` when every strategy fails.
pub fn recover_payload(raw_body: &str) -> Option<Recovered> {
    if raw_body.trim().is_empty() {
        return None;
    }

    STRATEGIES.iter().find_map(|&(strategy, recover)| {
        recover(raw_body).map(|payload| Recovered { strategy, payload })
    })
}

/// Parse `text` as a JSON object
pub fn parse_object(text: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// The object nested under an outer object's `body` field.
///
/// A string `body` is parsed as-is; any other value is re-serialized compactly
/// first. Yields `None` when the nested value is not an object so the outer
/// document can still be recovered by the direct strategy.
pub fn unwrap_proxy_body(text: &str) -> Option<JsonObject> {
    let outer = parse_object(text)?;
    let nested = match outer.get("body")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    parse_object(&nested)
}

/// A body that is itself a JSON string literal wrapping an object
pub fn parse_quoted_object(text: &str) -> Option<JsonObject> {
    let trimmed = text.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('"') || !trimmed.ends_with('"') {
        return None;
    }

    let unquoted: String = serde_json::from_str(trimmed).ok()?;
    parse_object(&unquoted)
}
