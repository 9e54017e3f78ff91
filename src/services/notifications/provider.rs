//! Core notification provider trait and types.
//!
//! The relay delivers through this trait so the transport can be swapped
//! (tests substitute a counting mock).

use crate::error::AppResult;
use crate::models::SlackMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a delivery attempt that reached the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// HTTP status code returned by the endpoint
    pub status_code: u16,
    /// Full response body
    pub response: String,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

impl NotificationResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Outbound transport for relay messages
///
/// A response with any status is `Ok`; only transport failures (DNS,
/// connection refused, invalid URL, timeout) are `Err`.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Posts `message` to `target_url` once
    async fn send(&self, target_url: &str, message: &SlackMessage)
    -> AppResult<NotificationResult>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;
}
