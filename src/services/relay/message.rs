//! Notification text extraction.

use serde_json::Value;

use super::payload::JsonObject;

/// Text used when no payload could be recovered
pub const NO_ISSUE: &str = "<no-issue>";

/// Choose the notification text for a recovered payload.
///
/// Preference: `issue.html_url`, then `issue.title`, then the whole payload
/// serialized compactly, then [`NO_ISSUE`] when there is no payload.
pub fn extract_message(payload: Option<&JsonObject>) -> String {
    let Some(payload) = payload else {
        return NO_ISSUE.to_string();
    };

    issue_field(payload, "html_url")
        .or_else(|| issue_field(payload, "title"))
        .unwrap_or_else(|| Value::Object(payload.clone()).to_string())
}

/// Non-blank text at `issue.<field>`; `null` counts as absent
fn issue_field(payload: &JsonObject, field: &str) -> Option<String> {
    let text = match payload.get("issue")?.get(field)? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    (!text.trim().is_empty()).then_some(text)
}
