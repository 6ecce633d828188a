//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the collector expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - No process/filesystem/socket implementation details
//! - Every fallible method returns a typed error; the probes in
//!   [`crate::probes`] decide how a failure degrades

pub mod database;
pub mod host_environment;
pub mod system_probe;

use thiserror::Error;

pub use database::{DatabaseError, DatabaseHandle};
pub use host_environment::{HostEnvironment, SERVER_ADDR_HEADER, StaticEnvironment};
pub use system_probe::{LsbField, SystemProbePort};

/// Why a single probe source produced nothing.
///
/// These never reach the caller of the collector: probes log them and fall
/// through to the next source.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A file could not be read.
    #[error("Failed to read {path}: {reason}")]
    FileUnreadable { path: String, reason: String },

    /// An external command could not be started or exited non-zero.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Name resolution failed.
    #[error("Lookup of {name} failed: {reason}")]
    LookupFailed { name: String, reason: String },

    /// A socket could not be opened or inspected.
    #[error("Socket probe failed: {0}")]
    Socket(String),

    /// The operation did not finish in time.
    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

/// Result type for probe sources.
///
/// `Ok(None)` means the source answered but had nothing to say.
pub type ProbeResult<T> = Result<Option<T>, ProbeError>;
