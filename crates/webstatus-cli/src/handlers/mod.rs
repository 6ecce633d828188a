//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(...) -> Result<(), CliError>`
//! - Thin wrappers that apply subcommand options, call into the adapters and
//!   write terminal output.

pub mod dump;
pub mod serve;
