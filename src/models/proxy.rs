//! Gateway proxy event and response shapes.
//!
//! The relay sees an inbound event as an API gateway forwards it: the original
//! HTTP body is nested as a string under `body`. The reply uses the matching
//! `{ "statusCode": ..., "body": ... }` shape.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Inbound gateway proxy event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl ProxyRequest {
    /// Build an event carrying `body` as-is
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Default::default()
        }
    }

    /// The body the relay should operate on.
    ///
    /// A missing body is the empty string. Base64 bodies are decoded to UTF-8;
    /// if decoding fails the body is passed through unchanged.
    pub fn raw_body(&self) -> String {
        let Some(body) = self.body.as_deref() else {
            return String::new();
        };

        if !self.is_base64_encoded {
            return body.to_string();
        }

        STANDARD
            .decode(body.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_else(|| body.to_string())
    }
}

/// Outcome of one relay invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub body: String,
}

impl ProxyResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Delivery accepted downstream
    pub fn ok() -> Self {
        Self::new(200, "ok")
    }

    /// No delivery target configured
    pub fn missing_target() -> Self {
        Self::new(500, "Missing SLACK_URL")
    }

    /// Downstream answered with a non-success status
    pub fn bad_gateway(status: u16, response: &str) -> Self {
        Self::new(502, format!("Slack returned {}: {}", status, response))
    }

    /// Any other fault during the invocation
    pub fn exception(message: impl std::fmt::Display) -> Self {
        Self::new(500, format!("Exception: {}", message))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
