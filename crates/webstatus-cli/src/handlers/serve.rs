//! Serve command handler.

use webstatus_axum::{ServerConfig, start_server};
use webstatus_core::Settings;

use crate::error::CliError;

/// Resolve the server configuration for `serve`.
///
/// Applies `--bind` and checks the token, so a misconfigured deployment
/// fails before binding.
pub fn server_config(
    mut settings: Settings,
    bind: Option<String>,
) -> Result<ServerConfig, CliError> {
    if bind.is_some() {
        settings.bind = bind;
    }
    Ok(ServerConfig::from_settings(settings)?)
}

/// Execute the serve command.
///
/// Runs until Ctrl-C.
pub async fn execute(settings: Settings, bind: Option<String>) -> Result<(), CliError> {
    let config = server_config(settings, bind)?;
    start_server(config).await?;
    Ok(())
}
