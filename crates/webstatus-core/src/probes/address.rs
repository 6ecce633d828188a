use std::net::IpAddr;

use super::ProbeChain;
use crate::ports::{HostEnvironment, ProbeResult, SERVER_ADDR_HEADER, SystemProbePort};

/// Determine the server's own IP address.
///
/// Sources, in order:
///
/// 1. the local address the current connection was accepted on
/// 2. the `X-Server-Addr` header set by a fronting proxy, when it holds an
///    IP address
/// 3. forward DNS of the host name (`HOSTNAME`, else the OS host name),
///    ignored when the lookup just echoes the name back
/// 4. the source address the kernel picks for a UDP route to a public
///    resolver (no packet is sent)
///
/// Returns `None` when every source comes up empty.
pub async fn detect_server_address(
    system: &dyn SystemProbePort,
    env: &dyn HostEnvironment,
) -> Option<String> {
    ProbeChain::new("server-ip")
        .then_sync("local-addr", || {
            Ok(env
                .local_addr()
                .filter(|addr| !addr.is_unspecified())
                .map(|addr| addr.to_string()))
        })
        .then_sync("forwarded-header", || {
            Ok(env
                .header(SERVER_ADDR_HEADER)
                .and_then(|value| value.trim().parse::<IpAddr>().ok())
                .map(|addr| addr.to_string()))
        })
        .then("host-name-dns", move || resolve_own_name(system, env))
        .then("udp-route", move || async move {
            Ok(system.outbound_address().await?.map(|addr| addr.to_string()))
        })
        .first()
        .await
        .map(|hit| hit.value)
}

async fn resolve_own_name(
    system: &dyn SystemProbePort,
    env: &dyn HostEnvironment,
) -> ProbeResult<String> {
    let name = env
        .var("HOSTNAME")
        .or_else(|| system.host_name())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let Some(name) = name else {
        return Ok(None);
    };

    let resolved = system.resolve_host(&name).await?;
    Ok(resolved
        .map(|addr| addr.to_string())
        .filter(|addr| *addr != name))
}
