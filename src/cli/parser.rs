//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Relays issue-tracker webhooks to a Slack incoming webhook
#[derive(Parser, Debug)]
#[command(name = "issue-relay")]
#[command(about = "Relays issue-tracker webhooks to a Slack incoming webhook")]
#[command(long_about = "
issue-relay receives issue-tracker webhooks (directly or wrapped in an API
gateway proxy event), extracts the issue link and posts it to a Slack
incoming webhook.

EXAMPLES:
    # Listen for webhooks on all interfaces
    issue-relay serve --host 0.0.0.0 --port 8080

    # Relay one gateway event read from a file
    issue-relay invoke --event event.json

    # Relay a raw webhook body from stdin
    echo '{\"issue\":{\"title\":\"Bug\"}}' | issue-relay invoke --raw

The delivery URL is read from relay.slack_url or the SLACK_URL environment
variable.
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Single TOML file instead of the layered config directory
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Which `{environment}.toml` is layered over `default.toml`
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve `/webhook` and `/api/invocations` (default)
    Serve {
        /// Bind address, overrides `server.host`
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Overrides `server.port`
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Wins over `logger.level`, --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate settings and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the relay once and print the response JSON
    ///
    /// The exit code is 0 whatever the relay answers; the printed
    /// `statusCode` carries the outcome.
    Invoke {
        /// Read input from FILE instead of stdin
        #[arg(long, value_name = "FILE")]
        event: Option<PathBuf>,

        /// Treat input as the raw webhook body rather than a gateway event
        #[arg(long)]
        raw: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks that clap's declarative rules can't express
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Invoke {
            event: Some(path), ..
        }) = &self.command
            && !path.is_file()
        {
            return Err(format!("Event file does not exist: '{}'", path.display()));
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["issue-relay", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["issue-relay", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["issue-relay"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "issue-relay",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "warning",
        ])
        .unwrap();

        let Some(Commands::Serve {
            host,
            port,
            log_level,
            dry_run,
        }) = cli.command
        else {
            panic!("Expected Serve command");
        };
        assert_eq!(host, Some("0.0.0.0".to_string()));
        assert_eq!(port, Some(8080));
        assert_eq!(log_level, Some(LogLevel::Warn));
        assert!(!dry_run);
    }

    #[test]
    fn test_serve_rejects_port_zero() {
        assert!(Cli::try_parse_from(["issue-relay", "serve", "--port", "0"]).is_err());
    }

    #[test]
    fn test_invoke_command() {
        let cli = Cli::try_parse_from(["issue-relay", "invoke", "--raw"]).unwrap();
        let Some(Commands::Invoke { event, raw }) = cli.command else {
            panic!("Expected Invoke command");
        };
        assert!(event.is_none());
        assert!(raw);
    }

    #[test]
    fn test_invoke_missing_event_file_fails_validation() {
        let cli = Cli::try_parse_from([
            "issue-relay",
            "invoke",
            "--event",
            "/definitely/not/here.json",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["issue-relay", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));

        let cli = Cli::try_parse_from(["issue-relay", "--env", "stage"]).unwrap();
        assert_eq!(
            crate::config::Environment::from(cli.env.unwrap()),
            crate::config::Environment::Staging
        );
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["issue-relay", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
