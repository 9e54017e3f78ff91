//! Settings sections: `application`, `server`, `relay`, `http_client`, `logger`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

fn default_app_name() -> String {
    "issue-relay".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_pool_max_idle_per_host() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/relay.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Name and version reported at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

/// Listen address of the HTTP host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Delivery target of the relay.
///
/// `slack_url` is allowed to be empty: every invocation then answers
/// `500 Missing SLACK_URL` instead of the process refusing to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RelayConfig {
    /// Slack incoming webhook URL, also settable through `SLACK_URL`
    #[serde(default)]
    pub slack_url: String,

    /// Text prepended to every delivered message (e.g. "Issue Created: ")
    #[serde(default)]
    pub message_prefix: String,
}

impl RelayConfig {
    /// The configured target, or `None` when it is blank.
    pub fn target_url(&self) -> Option<&str> {
        let url = self.slack_url.trim();
        if url.is_empty() { None } else { Some(url) }
    }
}

/// Client used to reach the Slack webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Total request timeout in seconds; `None` leaves reqwest's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,

    /// Connect timeout in seconds; `None` leaves reqwest's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,

    /// Idle connections kept per host in the pool
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: None,
            connect_timeout: None,
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
        }
    }
}

/// `[logger.console]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// ANSI colors, only when stderr is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// `[logger.file]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    /// Truncate on startup when false
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// `[logger]`, converted into the runtime `LoggerConfig` at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl ConsoleSettings {
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }

    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

/// Everything the relay reads at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub http_client: HttpClientConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![
                Just("127.0.0.1".to_string()),
                Just("0.0.0.0".to_string()),
                Just("localhost".to_string()),
            ],
            1u16..=65535,
        )
            .prop_map(|(host, port)| ServerConfig { host, port })
    }

    fn arb_relay_config() -> impl Strategy<Value = RelayConfig> {
        (
            prop_oneof![
                Just(String::new()),
                Just("https://hooks.slack.com/services/T000/B000/XXXX".to_string()),
            ],
            prop_oneof![Just(String::new()), Just("Issue Created: ".to_string())],
        )
            .prop_map(|(slack_url, message_prefix)| RelayConfig {
                slack_url,
                message_prefix,
            })
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_server_config(),
            arb_relay_config(),
            proptest::option::of(1u64..120),
            proptest::option::of(1u64..60),
        ).prop_map(
            |(server, relay, request_timeout, connect_timeout)| Settings {
                server,
                relay,
                http_client: HttpClientConfig {
                    request_timeout,
                    connect_timeout,
                    pool_max_idle_per_host: 10,
                },
                ..Settings::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings).expect("serialize");
            let parsed: Settings = toml::from_str(&toml_str).expect("deserialize");
            prop_assert_eq!(settings, parsed);
        }
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_relay_config_defaults_to_no_target() {
        let config = RelayConfig::default();
        assert_eq!(config.target_url(), None);
        assert!(config.message_prefix.is_empty());
    }

    #[test]
    fn test_relay_config_blank_target_is_none() {
        let config = RelayConfig {
            slack_url: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.target_url(), None);
    }

    #[test]
    fn test_relay_config_target_is_trimmed() {
        let config = RelayConfig {
            slack_url: " https://hooks.slack.com/services/x ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.target_url(),
            Some("https://hooks.slack.com/services/x")
        );
    }

    #[test]
    fn test_http_client_config_defaults() {
        let config = HttpClientConfig::default();
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.pool_max_idle_per_host, 10);
    }

    #[test]
    fn test_http_client_config_reads_timeouts() {
        let toml_str = r#"
[http_client]
request_timeout = 15
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.http_client.request_timeout, Some(15));
        assert_eq!(settings.http_client.connect_timeout, None);
    }

    #[test]
    fn test_logger_settings_defaults() {
        let settings = LoggerSettings::default();
        assert_eq!(settings.level, "info");
        assert!(settings.console.enabled);
        assert!(!settings.file.enabled);
        assert_eq!(settings.file.format, "json");
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
[server]
port = 8080

[relay]
slack_url = "https://hooks.slack.com/services/a/b/c"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(
            settings.relay.target_url(),
            Some("https://hooks.slack.com/services/a/b/c")
        );
        assert_eq!(settings.http_client, HttpClientConfig::default());
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings::default(),
        };

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert!(!config.console.colored);
        assert_eq!(config.file.format, LogFormat::Json);
    }

    #[test]
    fn test_file_settings_into_file_config_invalid_format() {
        let settings = FileSettings {
            format: "xml".to_string(),
            ..Default::default()
        };
        let result = settings.into_file_config();
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref field, .. }) if field == "logger.file.format"
        ));
    }

    #[test]
    fn test_logger_settings_into_logger_config_invalid_level() {
        let settings = LoggerSettings {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());
    }

    #[test]
    fn test_logger_settings_into_logger_config_both_disabled() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            file: FileSettings {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());
    }
}
