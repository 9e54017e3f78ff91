//! Slack incoming-webhook provider.
//!
//! Posts `{"text": ...}` over a shared `reqwest::Client` so the connection
//! pool is reused across invocations. Errors never carry the target URL:
//! the webhook path is a credential.

use super::provider::{NotificationProvider, NotificationResult};
use crate::error::{AppError, AppResult};
use crate::models::SlackMessage;
use async_trait::async_trait;
use std::time::Instant;

/// Slack notification provider
///
/// # Example
/// ```ignore
/// let client = build_http_client(&settings.http_client)?;
/// let provider = SlackProvider::new(client);
/// let result = provider.send(url, &SlackMessage::new("hello")).await?;
/// ```
#[derive(Clone)]
pub struct SlackProvider {
    client: reqwest::Client,
}

impl SlackProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationProvider for SlackProvider {
    async fn send(
        &self,
        target_url: &str,
        message: &SlackMessage,
    ) -> AppResult<NotificationResult> {
        let start = Instant::now();

        let response = self
            .client
            .post(target_url)
            .json(message)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("Failed to reach Slack: {}", e.without_url())))?;

        let status_code = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| {
                AppError::delivery(format!("Failed to read Slack response: {}", e.without_url()))
            })?;

        Ok(NotificationResult {
            status_code,
            response: body,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "slack"
    }
}
