//! Fail-safe probes and the fallback chain they are built from.
//!
//! Each probe determines one fact from one or more unreliable sources and
//! never fails: the worst outcome is an empty or absent value.

mod address;
mod chain;
mod database;
mod os;
mod os_release;

pub use address::detect_server_address;
pub use chain::{Candidate, ProbeChain, ProbeHit};
pub use database::{Dialect, detect_database};
pub use os::detect_os;
pub use os_release::OsRelease;

/// Tracing target shared by all probes.
pub const PROBE_TARGET: &str = "webstatus.probe";
