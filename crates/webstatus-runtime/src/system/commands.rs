//! External command execution.

use std::process::Command;

use webstatus_core::{ProbeError, ProbeResult};

/// Run a command and return the first line of its stdout, trimmed.
///
/// A missing binary or non-zero exit is an error; empty output is `None`.
pub fn command_output(cmd: &str, args: &[&str]) -> ProbeResult<String> {
    let command_line = || {
        std::iter::once(cmd)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let output = Command::new(cmd)
        .args(args)
        .output()
        .map_err(|e| ProbeError::CommandFailed {
            command: command_line(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            command: command_line(),
            reason: format!("exited with {}", output.status),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string))
}
