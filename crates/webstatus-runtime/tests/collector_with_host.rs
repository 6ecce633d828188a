//! Collects snapshots against the real host, with a pinned os-release file.

use std::io::Write;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use webstatus_core::{Snapshot, StaticEnvironment, StatusCollector};
use webstatus_runtime::{DefaultSystemProbe, ProcessEnvironment, build_info};

fn os_release_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_snapshot_uses_os_release_file() {
    let file = os_release_file("NAME=\"Ubuntu\"\nVERSION=\"22.04.1 LTS\"\n");
    let probe = DefaultSystemProbe::new()
        .with_os_release_path(file.path())
        .with_route_target((Ipv4Addr::LOCALHOST, 9).into());
    let collector = StatusCollector::new(build_info(), Arc::new(probe));

    let snapshot = collector.collect("localhost", &ProcessEnvironment).await;

    assert_eq!(snapshot.server_operating_system, "Ubuntu");
    assert_eq!(snapshot.server_operating_system_version, "22.04.1 LTS");
    assert_eq!(snapshot.framework, "axum");
    assert!(snapshot.server_ip.is_some());
    assert!(snapshot.db_server.is_none());
}

#[tokio::test]
async fn test_missing_sources_fall_back_to_kernel() {
    let dir = tempfile::tempdir().unwrap();
    let probe = DefaultSystemProbe::new()
        .with_os_release_path(dir.path().join("missing"))
        .with_lsb_command("definitely_not_lsb_release_12345")
        .with_route_target((Ipv4Addr::LOCALHOST, 9).into());
    let kernel = webstatus_runtime::system::kernel_info();
    let collector = StatusCollector::new(build_info(), Arc::new(probe));

    let snapshot = collector.collect("", &StaticEnvironment::new()).await;

    assert_eq!(snapshot.server_operating_system, kernel.name);
    assert_eq!(snapshot.server_operating_system_version, kernel.release);
    assert_eq!(snapshot.server_name, kernel.node_name);
}

#[tokio::test]
async fn test_connection_address_short_circuits_network_probes() {
    let local: SocketAddr = (Ipv4Addr::new(10, 20, 30, 40), 8080).into();
    let env = StaticEnvironment::new().with_local_addr(local.ip());
    let collector = StatusCollector::new(build_info(), Arc::new(DefaultSystemProbe::new()));

    let snapshot = collector.collect("", &env).await;

    assert_eq!(snapshot.server_ip.as_deref(), Some("10.20.30.40"));
}

#[tokio::test]
async fn test_serialized_snapshot_has_every_key() {
    let collector = StatusCollector::new(
        build_info(),
        Arc::new(DefaultSystemProbe::new().with_route_target((Ipv4Addr::LOCALHOST, 9).into())),
    );
    let snapshot = collector.collect("", &ProcessEnvironment).await;
    let body = String::from_utf8(snapshot.to_json_bytes().unwrap()).unwrap();

    for key in Snapshot::FIELDS {
        assert!(body.contains(&format!("\"{key}\":")), "missing {key} in {body}");
    }
}
