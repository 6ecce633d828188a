//! System probe port for OS and network detection.
//!
//! This port abstracts active system probing (file reads, command execution,
//! system calls, sockets) from the collector. Implementations live in
//! adapters (e.g., `webstatus-runtime`).
//!
//! # Design Notes
//!
//! - Core owns the trait and types (pure)
//! - Runtime owns the implementation (`/etc/os-release`, `lsb_release`,
//!   `uname`, DNS, UDP sockets)
//! - Composition roots inject the probe into the collector

use std::net::IpAddr;

use async_trait::async_trait;

use super::ProbeResult;
use crate::domain::KernelInfo;

/// Which value to ask `lsb_release` for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsbField {
    /// Distributor id (`lsb_release -si`).
    Distributor,
    /// Release number (`lsb_release -sr`).
    Release,
}

impl LsbField {
    /// Command-line flag selecting this field.
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Distributor => "-si",
            Self::Release => "-sr",
        }
    }
}

/// Port for probing the host system.
///
/// Every method reads exactly one source. Fallback ordering between sources
/// is the collector's business, not the implementation's.
#[async_trait]
pub trait SystemProbePort: Send + Sync {
    /// Raw contents of the OS-release descriptor file.
    fn os_release(&self) -> ProbeResult<String>;

    /// Single value reported by the `lsb_release` utility.
    fn lsb_release(&self, field: LsbField) -> ProbeResult<String>;

    /// Kernel identification. Always succeeds on a POSIX-like host.
    fn kernel(&self) -> KernelInfo;

    /// Host name from the operating system.
    fn host_name(&self) -> Option<String>;

    /// Forward DNS lookup of a host name.
    async fn resolve_host(&self, name: &str) -> ProbeResult<IpAddr>;

    /// Local source address the routing table picks for outbound traffic.
    async fn outbound_address(&self) -> ProbeResult<IpAddr>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_flags() {
        assert_eq!(LsbField::Distributor.flag(), "-si");
        assert_eq!(LsbField::Release.flag(), "-sr");
    }
}
