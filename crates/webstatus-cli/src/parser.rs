//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options. Every
//! global option is also read from the environment, so a `.env` file alone
//! is enough to configure a deployment.

use chrono::NaiveDate;
use clap::Parser;
use webstatus_core::{Settings, SettingsError, parse_lifecycle_date};

use crate::commands::Commands;

/// Command-line interface definition for the status endpoint.
#[derive(Parser)]
#[command(name = "webstatus")]
#[command(about = "Report framework, host and database facts as JSON")]
#[command(version = webstatus_build_info::LONG_VERSION)]
pub struct Cli {
    /// Shared secret clients must present to read the status
    #[arg(long, env = "WEBSTATUS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Deployment environment name
    #[arg(long = "env", env = "APP_ENV", global = true)]
    pub environment: Option<String>,

    /// Database connection URL (mysql://, postgres://, sqlite:, ...)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    pub database_url: Option<String>,

    /// Date the framework release stops receiving bug fixes (YYYY-MM-DD)
    #[arg(
        long,
        env = "WEBSTATUS_END_OF_MAINTENANCE",
        value_parser = end_of_maintenance,
        global = true
    )]
    pub end_of_maintenance: Option<NaiveDate>,

    /// Date the framework release stops receiving security fixes (YYYY-MM-DD)
    #[arg(
        long,
        env = "WEBSTATUS_END_OF_LIFE",
        value_parser = end_of_life,
        global = true
    )]
    pub end_of_life: Option<NaiveDate>,

    /// OS-release file to read
    #[arg(long = "os-release", env = "WEBSTATUS_OS_RELEASE", global = true)]
    pub os_release_path: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings described by the global options.
    ///
    /// Subcommand options (such as `serve --bind`) are applied by the handler.
    pub fn settings(&self) -> Settings {
        Settings {
            token: self.token.clone(),
            environment: self.environment.clone(),
            database_url: self.database_url.clone(),
            bind: None,
            end_of_maintenance: self.end_of_maintenance,
            end_of_life: self.end_of_life,
            os_release_path: self.os_release_path.clone(),
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub const fn default_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

fn end_of_maintenance(value: &str) -> Result<NaiveDate, SettingsError> {
    parse_lifecycle_date("end of maintenance", value)
}

fn end_of_life(value: &str) -> Result<NaiveDate, SettingsError> {
    parse_lifecycle_date("end of life", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::try_parse_from([
            "webstatus",
            "--verbose",
            "--token",
            "s3cret",
            "--env",
            "staging",
            "--end-of-life",
            "2026-07-31",
            "dump",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.default_log_level(), "debug");

        let settings = cli.settings();
        assert_eq!(settings.token.as_deref(), Some("s3cret"));
        assert_eq!(settings.environment.as_deref(), Some("staging"));
        assert_eq!(
            settings.end_of_life,
            NaiveDate::from_ymd_opt(2026, 7, 31)
        );
        assert_eq!(settings.bind, None);
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::try_parse_from([
            "webstatus",
            "dump",
            "--os-release",
            "/tmp/os-release",
            "--end-of-maintenance",
            "2025-11-30",
        ])
        .unwrap();

        assert_eq!(cli.os_release_path.as_deref(), Some("/tmp/os-release"));
        assert_eq!(
            cli.end_of_maintenance,
            NaiveDate::from_ymd_opt(2025, 11, 30)
        );
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = Cli::try_parse_from(["webstatus", "--end-of-life", "31.07.2026", "dump"]);
        assert!(result.is_err());
    }
}
