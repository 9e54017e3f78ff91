use std::time::Duration;

use crate::config::HttpClientConfig;
use crate::error::{AppError, AppResult};

/// Build the shared outbound HTTP client
///
/// One client is created at startup and cloned into providers; clones share
/// the same connection pool.
///
/// # Features
/// - **Timeouts**: only when set in `http_client`; otherwise reqwest's defaults
/// - **Connection pooling**: idle connections kept per host
/// - **Compression**: gzip responses are decoded transparently
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
pub fn build_http_client(config: &HttpClientConfig) -> AppResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.request_timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = config.connect_timeout {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }

    builder
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(90))
        .http2_adaptive_window(true)
        .gzip(true)
        .user_agent(user_agent())
        .build()
        .map_err(|e| AppError::Configuration {
            key: "http_client".to_string(),
            source: e.into(),
        })
}

fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), crate::pkg_version())
}
