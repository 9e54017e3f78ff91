//! Invoke command handler
//!
//! One-shot host: read one event, run the relay once, print the response.

use std::path::Path;

use tokio::io::AsyncReadExt;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::models::{ProxyRequest, ProxyResponse};
use crate::state::AppState;

/// Handler for the invoke command
pub struct InvokeCommandHandler {
    state: AppState,
}

impl InvokeCommandHandler {
    /// Build the production relay from settings
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        Ok(Self::with_state(AppState::from_settings(settings)?))
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    /// Read input from `event` (or stdin), relay it and print the response JSON
    pub async fn execute(&self, event: Option<&Path>, raw: bool) -> AppResult<()> {
        let input = read_input(event).await?;
        let response = self.run(&input, raw).await?;
        println!("{}", serde_json::to_string(&response)?);
        Ok(())
    }

    /// Relay `input`, either a raw body or a gateway proxy event
    pub async fn run(&self, input: &str, raw: bool) -> AppResult<ProxyResponse> {
        let raw_body = if raw {
            input.to_string()
        } else {
            let event: ProxyRequest = serde_json::from_str(input).map_err(|e| {
                AppError::BadRequest {
                    message: format!("Invalid event: {}", e),
                }
            })?;
            event.raw_body()
        };

        Ok(self
            .state
            .relay
            .handle(&raw_body, self.state.target_url())
            .await)
    }
}

async fn read_input(event: Option<&Path>) -> AppResult<String> {
    let input = match event {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map(|_| buf)
        }
    };

    input.map_err(|e| AppError::BadRequest {
        message: format!("Failed to read input: {}", e),
    })
}
