//! Dump command handler.
//!
//! Collects one snapshot against the process environment and prints it.

use std::io::Write;

use webstatus_runtime::ProcessEnvironment;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Collect a snapshot and render it as JSON.
pub async fn render(ctx: &CliContext, host: &str, pretty: bool) -> Result<String, CliError> {
    let snapshot = ctx.collector().collect(host, &ProcessEnvironment).await;
    if pretty {
        Ok(snapshot.to_json_pretty()?)
    } else {
        Ok(String::from_utf8_lossy(&snapshot.to_json_bytes()?).into_owned())
    }
}

/// Execute the dump command.
pub async fn execute(ctx: &CliContext, host: &str, pretty: bool) -> Result<(), CliError> {
    let body = render(ctx, host, pretty).await?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{body}")?;
    stdout.flush()?;
    Ok(())
}
