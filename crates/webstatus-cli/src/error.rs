//! CLI-specific error types and exit codes.

use thiserror::Error;
use webstatus_core::SettingsError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (stdout closed, bind failure, ...).
    #[error("IO error: {0}")]
    Io(String),

    /// Snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The HTTP server stopped with an error.
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,        // EX_CONFIG
            Self::Io(_) => 74,            // EX_IOERR
            Self::Serialization(_) => 70, // EX_SOFTWARE
            Self::Server(_) => 1,
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Server(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_errors_are_config_errors() {
        let err = CliError::from(SettingsError::MissingToken);
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_io_exit_code() {
        let err = CliError::from(std::io::Error::other("broken pipe"));
        assert_eq!(err.exit_code(), 74);
        assert_eq!(err.to_string(), "IO error: broken pipe");
    }
}
