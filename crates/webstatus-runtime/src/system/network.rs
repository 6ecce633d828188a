//! Name resolution and route selection.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::{UdpSocket, lookup_host};
use webstatus_core::{ProbeError, ProbeResult};

/// Forward DNS lookup. IPv4 answers are preferred over IPv6.
pub async fn resolve_host(name: &str) -> ProbeResult<IpAddr> {
    let addrs: Vec<IpAddr> = lookup_host((name, 0))
        .await
        .map_err(|e| ProbeError::LookupFailed {
            name: name.to_string(),
            reason: e.to_string(),
        })?
        .map(|addr| addr.ip())
        .collect();

    Ok(addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied())
}

/// Local address the routing table selects for traffic to `target`.
///
/// Connecting a UDP socket only fixes its peer; nothing is sent. The socket
/// is dropped before returning.
pub async fn outbound_address(target: SocketAddr, limit: Duration) -> ProbeResult<IpAddr> {
    match tokio::time::timeout(limit, route_local_addr(target)).await {
        Ok(Ok(local)) => Ok(Some(local.ip())),
        Ok(Err(err)) => Err(ProbeError::Socket(err.to_string())),
        Err(_) => Err(ProbeError::Timeout(
            u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}

async fn route_local_addr(target: SocketAddr) -> io::Result<SocketAddr> {
    let bind: SocketAddr = if target.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(bind).await?;
    socket.connect(target).await?;
    socket.local_addr()
}
