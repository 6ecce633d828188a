//! CLI bootstrap - the composition root for one-shot commands.
//!
//! `serve` hands its settings to the Axum adapter, which composes its own
//! context. Every other command gets a `CliContext` from here.

use webstatus_core::{Settings, StatusCollector, validate_settings};

use crate::error::CliError;

/// Fully composed context for CLI commands.
#[derive(Debug)]
pub struct CliContext {
    /// Validated settings.
    pub settings: Settings,
    /// Collector wired to the real host and the configured database.
    pub collector: StatusCollector,
}

impl CliContext {
    /// Access the collector.
    pub const fn collector(&self) -> &StatusCollector {
        &self.collector
    }
}

/// Bootstrap the CLI context.
///
/// Validates `settings` (a token is not required here) and builds the same
/// collector the HTTP server uses.
pub fn bootstrap(settings: Settings) -> Result<CliContext, CliError> {
    validate_settings(&settings)?;
    let collector = webstatus_axum::build_collector(&settings);
    Ok(CliContext {
        settings,
        collector,
    })
}
