//! Host environment port.
//!
//! Replaces ambient process/request state (environment variables, request
//! headers, the connection's local address) with an injected capability so
//! the collector is a function of its inputs.

use std::collections::HashMap;
use std::net::IpAddr;

/// Header a reverse proxy may set to forward the origin server's address.
pub const SERVER_ADDR_HEADER: &str = "x-server-addr";

/// Read-only view of the environment a collection runs in.
pub trait HostEnvironment: Send + Sync {
    /// Environment variable lookup.
    fn var(&self, key: &str) -> Option<String>;

    /// Request header lookup (case-insensitive). `None` outside a request.
    fn header(&self, _name: &str) -> Option<String> {
        None
    }

    /// Local address the current connection was accepted on.
    fn local_addr(&self) -> Option<IpAddr> {
        None
    }
}

/// A fixed, in-memory environment.
///
/// Used by tests and by callers that want to pin the environment explicitly.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
    headers: HashMap<String, String>,
    local_addr: Option<IpAddr>,
}

impl StaticEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Set the connection's local address.
    #[must_use]
    pub const fn with_local_addr(mut self, addr: IpAddr) -> Self {
        self.local_addr = Some(addr);
        self
    }
}

impl HostEnvironment for StaticEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_ascii_lowercase()).cloned()
    }

    fn local_addr(&self) -> Option<IpAddr> {
        self.local_addr
    }
}
