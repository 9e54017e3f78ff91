//! Recording provider for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::provider::{NotificationProvider, NotificationResult};
use crate::error::{AppError, AppResult};
use crate::models::SlackMessage;

pub(crate) enum Outcome {
    Status(u16, &'static str),
    TransportError,
}

/// Records every call and answers with a fixed outcome
pub(crate) struct MockProvider {
    outcome: Outcome,
    calls: Mutex<Vec<(String, SlackMessage)>>,
}

impl MockProvider {
    pub(crate) fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn responding(status: u16, body: &'static str) -> Arc<Self> {
        Self::new(Outcome::Status(status, body))
    }

    pub(crate) fn calls(&self) -> Vec<(String, SlackMessage)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn texts(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, m)| m.text).collect()
    }
}

#[async_trait]
impl NotificationProvider for MockProvider {
    async fn send(&self, target_url: &str, message: &SlackMessage) -> AppResult<NotificationResult> {
        self.calls
            .lock()
            .unwrap()
            .push((target_url.to_string(), message.clone()));

        match self.outcome {
            Outcome::Status(status_code, body) => Ok(NotificationResult {
                status_code,
                response: body.to_string(),
                duration_ms: 1,
            }),
            Outcome::TransportError => Err(AppError::delivery("connection refused")),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
