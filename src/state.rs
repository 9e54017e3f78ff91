//! Application state for the axum host.
//!
//! Shared, read-only per request: the relay (and the connection pool behind
//! its provider) plus the relay configuration.

use std::sync::Arc;

use crate::config::{RelayConfig, Settings};
use crate::error::AppResult;
use crate::external::build_http_client;
use crate::services::{NotificationProvider, RelayService, SlackProvider};

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since the provider sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub relay: RelayService,
    pub relay_config: RelayConfig,
}

impl AppState {
    pub fn new(relay: RelayService, relay_config: RelayConfig) -> Self {
        Self {
            relay,
            relay_config,
        }
    }

    /// Builds the production state: one pooled client behind a Slack provider.
    ///
    /// # Example
    /// ```ignore
    /// let settings = ConfigLoader::new()?.load()?;
    /// let state = AppState::from_settings(&settings)?;
    /// ```
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let client = build_http_client(&settings.http_client)?;
        let provider: Arc<dyn NotificationProvider> = Arc::new(SlackProvider::new(client));
        Ok(Self::with_provider(provider, settings.relay.clone()))
    }

    /// Builds state around any provider
    pub fn with_provider(provider: Arc<dyn NotificationProvider>, relay_config: RelayConfig) -> Self {
        let relay = RelayService::new(provider, relay_config.message_prefix.clone());
        Self::new(relay, relay_config)
    }

    /// Target URL passed into every invocation
    pub fn target_url(&self) -> Option<&str> {
        self.relay_config.target_url()
    }
}
