//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the status endpoint over HTTP until Ctrl-C
    Serve {
        /// Listen address
        #[arg(long, env = "WEBSTATUS_BIND")]
        bind: Option<String>,
    },

    /// Collect one snapshot and print it to stdout
    Dump {
        /// Host name to report in the `host` field
        #[arg(long, default_value = "")]
        host: String,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}
