//! Request-scoped host environment.

use std::net::{IpAddr, SocketAddr};

use axum::extract::connect_info::Connected;
use axum::http::HeaderMap;
use axum::serve::IncomingStream;
use tokio::net::TcpListener;
use webstatus_core::HostEnvironment;
use webstatus_runtime::ProcessEnvironment;

/// Local address a connection was accepted on.
///
/// Installed with `into_make_service_with_connect_info::<ServerAddr>()`;
/// handlers read it from the `ConnectInfo` extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerAddr(pub Option<SocketAddr>);

impl ServerAddr {
    pub fn ip(self) -> Option<IpAddr> {
        self.0.map(|addr| addr.ip())
    }
}

impl Connected<IncomingStream<'_, TcpListener>> for ServerAddr {
    fn connect_info(stream: IncomingStream<'_, TcpListener>) -> Self {
        Self(stream.io().local_addr().ok())
    }
}

/// Process environment overlaid with one request's headers and local
/// address.
#[derive(Debug)]
pub struct RequestEnvironment<'a> {
    headers: &'a HeaderMap,
    local_addr: Option<IpAddr>,
}

impl<'a> RequestEnvironment<'a> {
    pub const fn new(headers: &'a HeaderMap, local_addr: Option<IpAddr>) -> Self {
        Self {
            headers,
            local_addr,
        }
    }
}

impl HostEnvironment for RequestEnvironment<'_> {
    fn var(&self, key: &str) -> Option<String> {
        ProcessEnvironment.var(key)
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn local_addr(&self) -> Option<IpAddr> {
        self.local_addr
    }
}
