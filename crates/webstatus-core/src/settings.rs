//! Settings domain types and validation.
//!
//! Pure configuration values. Loading (`.env`, environment, flags) is the
//! composition root's job.

use std::fmt;
use std::net::SocketAddr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default HTTP listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default deployment environment name.
pub const DEFAULT_ENVIRONMENT: &str = "prod";

/// Default location of the OS-release descriptor file.
pub const DEFAULT_OS_RELEASE_PATH: &str = "/etc/os-release";

/// Format of lifecycle dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Application settings.
///
/// All fields are optional; the `effective_*` accessors apply defaults.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Shared secret clients must present. Required to serve.
    pub token: Option<String>,

    /// Deployment environment name (`prod`, `staging`, ...).
    pub environment: Option<String>,

    /// Database connection URL. No URL means no database.
    pub database_url: Option<String>,

    /// HTTP listen address.
    pub bind: Option<String>,

    /// Date the framework release stops receiving bug fixes.
    pub end_of_maintenance: Option<NaiveDate>,

    /// Date the framework release stops receiving security fixes.
    pub end_of_life: Option<NaiveDate>,

    /// OS-release file to read.
    pub os_release_path: Option<String>,
}

impl Settings {
    /// Effective environment name.
    pub fn effective_environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Effective listen address string.
    pub fn effective_bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    /// Effective OS-release path.
    pub fn effective_os_release_path(&self) -> &str {
        self.os_release_path
            .as_deref()
            .unwrap_or(DEFAULT_OS_RELEASE_PATH)
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let bind = self.effective_bind();
        bind.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddress(bind.to_string()))
    }

    /// The access token, trimmed. Fails when missing or blank.
    pub fn require_token(&self) -> Result<&str, SettingsError> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(SettingsError::MissingToken)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("bind", &self.bind)
            .field("end_of_maintenance", &self.end_of_maintenance)
            .field("end_of_life", &self.end_of_life)
            .field("os_release_path", &self.os_release_path)
            .finish()
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("An access token is required (set WEBSTATUS_TOKEN)")]
    MissingToken,

    #[error("Environment name cannot be empty")]
    EmptyEnvironment,

    #[error("Database URL cannot be empty")]
    EmptyDatabaseUrl,

    #[error("OS release path cannot be empty")]
    EmptyOsReleasePath,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid {field} date '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
}

/// Parse a `YYYY-MM-DD` lifecycle date.
pub fn parse_lifecycle_date(field: &'static str, value: &str) -> Result<NaiveDate, SettingsError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| SettingsError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Validate settings values.
///
/// The token is not checked here: only serving requires one, see
/// [`Settings::require_token`].
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings
        .environment
        .as_ref()
        .is_some_and(|env| env.trim().is_empty())
    {
        return Err(SettingsError::EmptyEnvironment);
    }

    if settings
        .database_url
        .as_ref()
        .is_some_and(|url| url.trim().is_empty())
    {
        return Err(SettingsError::EmptyDatabaseUrl);
    }

    if settings
        .os_release_path
        .as_ref()
        .is_some_and(|path| path.trim().is_empty())
    {
        return Err(SettingsError::EmptyOsReleasePath);
    }

    settings.bind_addr()?;

    Ok(())
}
