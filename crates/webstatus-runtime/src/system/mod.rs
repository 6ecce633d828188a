//! System probe implementation for webstatus-runtime.
//!
//! This module provides the `DefaultSystemProbe` which implements
//! `SystemProbePort` from webstatus-core. Each method reads exactly one
//! source; the fallback chains live in core.

mod commands;
mod kernel;
mod network;

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use sysinfo::System;
use webstatus_core::{
    DEFAULT_OS_RELEASE_PATH, KernelInfo, LsbField, ProbeError, ProbeResult, SystemProbePort,
};

pub use commands::command_output;
pub use kernel::kernel_info;

/// Public resolver used as the route-selection target.
pub const DEFAULT_ROUTE_TARGET: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 53));

/// Upper bound for the route-selection probe.
pub const DEFAULT_ROUTE_TIMEOUT: Duration = Duration::from_secs(1);

/// Default implementation of `SystemProbePort`.
///
/// Constructed by the composition root and shared behind an `Arc`.
///
/// # Example
///
/// ```ignore
/// use webstatus_runtime::DefaultSystemProbe;
///
/// let probe = DefaultSystemProbe::new().with_os_release_path("/etc/os-release");
/// let kernel = probe.kernel();
/// ```
#[derive(Debug, Clone)]
pub struct DefaultSystemProbe {
    os_release_path: PathBuf,
    lsb_command: String,
    route_target: SocketAddr,
    route_timeout: Duration,
}

impl DefaultSystemProbe {
    /// Create a probe with the standard paths and targets.
    pub fn new() -> Self {
        Self {
            os_release_path: PathBuf::from(DEFAULT_OS_RELEASE_PATH),
            lsb_command: "lsb_release".to_string(),
            route_target: DEFAULT_ROUTE_TARGET,
            route_timeout: DEFAULT_ROUTE_TIMEOUT,
        }
    }

    /// Read the OS-release descriptor from another path.
    #[must_use]
    pub fn with_os_release_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release_path = path.into();
        self
    }

    /// Use another `lsb_release` binary.
    #[must_use]
    pub fn with_lsb_command(mut self, command: impl Into<String>) -> Self {
        self.lsb_command = command.into();
        self
    }

    /// Select the outbound route towards another address.
    #[must_use]
    pub const fn with_route_target(mut self, target: SocketAddr) -> Self {
        self.route_target = target;
        self
    }

    /// OS-release path in use.
    pub fn os_release_path(&self) -> &Path {
        &self.os_release_path
    }
}

impl Default for DefaultSystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemProbePort for DefaultSystemProbe {
    fn os_release(&self) -> ProbeResult<String> {
        std::fs::read_to_string(&self.os_release_path)
            .map(Some)
            .map_err(|e| ProbeError::FileUnreadable {
                path: self.os_release_path.display().to_string(),
                reason: e.to_string(),
            })
    }

    fn lsb_release(&self, field: LsbField) -> ProbeResult<String> {
        command_output(&self.lsb_command, &[field.flag()])
    }

    fn kernel(&self) -> KernelInfo {
        kernel_info()
    }

    fn host_name(&self) -> Option<String> {
        System::host_name().filter(|name| !name.trim().is_empty())
    }

    async fn resolve_host(&self, name: &str) -> ProbeResult<std::net::IpAddr> {
        network::resolve_host(name).await
    }

    async fn outbound_address(&self) -> ProbeResult<std::net::IpAddr> {
        network::outbound_address(self.route_target, self.route_timeout).await
    }
}
