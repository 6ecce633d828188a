//! Integration tests for `StatusCollector` against hand-written fakes.

use std::collections::{BTreeSet, HashMap};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use webstatus_core::{
    BuildInfo, DatabaseError, DatabaseHandle, KernelInfo, LsbField, ProbeError, ProbeResult,
    Snapshot, StaticEnvironment, StatusCollector, SystemProbePort,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeSystem {
    os_release: Option<String>,
    lsb_distributor: Option<String>,
    lsb_release: Option<String>,
    host_name: Option<String>,
    dns: HashMap<String, IpAddr>,
    outbound: Option<IpAddr>,
    lsb_calls: AtomicUsize,
    dns_calls: AtomicUsize,
}

impl FakeSystem {
    fn with_os_release(content: &str) -> Self {
        Self {
            os_release: Some(content.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SystemProbePort for FakeSystem {
    fn os_release(&self) -> ProbeResult<String> {
        self.os_release
            .clone()
            .map(Some)
            .ok_or_else(|| ProbeError::FileUnreadable {
                path: "/etc/os-release".to_string(),
                reason: "No such file or directory".to_string(),
            })
    }

    fn lsb_release(&self, field: LsbField) -> ProbeResult<String> {
        self.lsb_calls.fetch_add(1, Ordering::SeqCst);
        let value = match field {
            LsbField::Distributor => &self.lsb_distributor,
            LsbField::Release => &self.lsb_release,
        };
        value
            .clone()
            .map(Some)
            .ok_or_else(|| ProbeError::CommandFailed {
                command: format!("lsb_release {}", field.flag()),
                reason: "not installed".to_string(),
            })
    }

    fn kernel(&self) -> KernelInfo {
        KernelInfo {
            name: "Linux".to_string(),
            release: "6.8.0-45-generic".to_string(),
            node_name: "web-01".to_string(),
        }
    }

    fn host_name(&self) -> Option<String> {
        self.host_name.clone()
    }

    async fn resolve_host(&self, name: &str) -> ProbeResult<IpAddr> {
        self.dns_calls.fetch_add(1, Ordering::SeqCst);
        self.dns
            .get(name)
            .copied()
            .map(Some)
            .ok_or_else(|| ProbeError::LookupFailed {
                name: name.to_string(),
                reason: "NXDOMAIN".to_string(),
            })
    }

    async fn outbound_address(&self) -> ProbeResult<IpAddr> {
        Ok(self.outbound)
    }
}

struct FakeDatabase {
    platform: Result<String, String>,
    hint: Option<String>,
    answers: HashMap<&'static str, Result<Option<String>, String>>,
}

impl FakeDatabase {
    fn new(platform: &str) -> Self {
        Self {
            platform: Ok(platform.to_string()),
            hint: None,
            answers: HashMap::new(),
        }
    }

    fn answer(mut self, sql: &'static str, version: &str) -> Self {
        self.answers.insert(sql, Ok(Some(version.to_string())));
        self
    }

    fn fail(mut self, sql: &'static str, message: &str) -> Self {
        self.answers.insert(sql, Err(message.to_string()));
        self
    }
}

#[async_trait]
impl DatabaseHandle for FakeDatabase {
    async fn platform(&self) -> Result<String, DatabaseError> {
        self.platform.clone().map_err(DatabaseError::Connection)
    }

    fn driver_hint(&self) -> Option<String> {
        self.hint.clone()
    }

    async fn query_scalar(&self, sql: &str) -> Result<Option<String>, DatabaseError> {
        match self.answers.get(sql) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(DatabaseError::Query(message.clone())),
            None => Err(DatabaseError::Query(format!("unexpected query: {sql}"))),
        }
    }
}

fn build_info() -> BuildInfo {
    BuildInfo::new("axum", "0.8.4")
        .with_runtime_version("1.88.0")
        .with_server_software("webstatus/0.3.0")
}

fn collector(system: FakeSystem) -> StatusCollector {
    StatusCollector::new(build_info(), Arc::new(system))
}

fn keys(snapshot: &Snapshot) -> BTreeSet<String> {
    match serde_json::to_value(snapshot) {
        Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
        other => panic!("snapshot did not serialize to an object: {other:?}"),
    }
}

const UBUNTU: &str = "NAME=\"Ubuntu\"\nVERSION=\"22.04.1 LTS\"\nVERSION_ID=\"22.04\"\n";

// ---------------------------------------------------------------------------
// Whole-snapshot behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_bare_host_still_yields_every_key() {
    let snapshot = collector(FakeSystem::default())
        .collect("", &StaticEnvironment::new())
        .await;

    let expected: BTreeSet<String> = Snapshot::FIELDS.iter().map(ToString::to_string).collect();
    assert_eq!(keys(&snapshot), expected);

    assert_eq!(snapshot.server_operating_system, "Linux");
    assert_eq!(snapshot.server_operating_system_version, "6.8.0-45-generic");
    assert_eq!(snapshot.server_name, "web-01");
    assert_eq!(snapshot.server_ip, None);
    assert_eq!(snapshot.db_server, None);
    assert_eq!(snapshot.db_version, None);
    assert_eq!(snapshot.db_error, None);
}

#[tokio::test]
async fn test_static_fields_come_from_build_and_configuration() {
    let eom = NaiveDate::from_ymd_opt(2025, 11, 30);
    let eol = NaiveDate::from_ymd_opt(2026, 7, 31);
    let snapshot = collector(FakeSystem::with_os_release(UBUNTU))
        .with_environment("staging")
        .with_lifecycle(eom, eol)
        .collect("status.example.com", &StaticEnvironment::new())
        .await;

    assert_eq!(snapshot.framework, "axum");
    assert_eq!(snapshot.framework_version, "0.8.4");
    assert_eq!(snapshot.framework_major_version, "0.8");
    assert_eq!(snapshot.runtime_version, "1.88.0");
    assert_eq!(snapshot.runtime_major_version, "1.88");
    assert_eq!(snapshot.environment, "staging");
    assert_eq!(snapshot.host, "status.example.com");
    assert_eq!(snapshot.framework_end_of_maintenance, eom);
    assert_eq!(snapshot.framework_end_of_life, eol);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["frameworkEndOfMaintenance"], "2025-11-30");
    assert_eq!(json["frameworkEndOfLife"], "2026-07-31");
}

#[tokio::test]
async fn test_server_software_prefers_environment() {
    let collector = collector(FakeSystem::default());

    let fallback = collector.collect("", &StaticEnvironment::new()).await;
    assert_eq!(fallback.server_software, "webstatus/0.3.0");

    let env = StaticEnvironment::new().with_var("SERVER_SOFTWARE", "nginx/1.25.3");
    let from_env = collector.collect("", &env).await;
    assert_eq!(from_env.server_software, "nginx/1.25.3");
}

#[tokio::test]
async fn test_repeated_collection_has_identical_keys() {
    let collector = collector(FakeSystem::with_os_release(UBUNTU));
    let env = StaticEnvironment::new();

    let first = collector.collect("a.example", &env).await;
    let second = collector.collect("a.example", &env).await;

    assert_eq!(keys(&first), keys(&second));
    assert_eq!(first.server_operating_system, second.server_operating_system);
    assert_eq!(first.framework_version, second.framework_version);
    assert!(second.generated_at >= first.generated_at);
}

// ---------------------------------------------------------------------------
// OS identity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_os_release_name_and_version() {
    let system = FakeSystem::with_os_release(UBUNTU);
    let snapshot = collector(system).collect("", &StaticEnvironment::new()).await;

    assert_eq!(snapshot.server_operating_system, "Ubuntu");
    assert_eq!(snapshot.server_operating_system_version, "22.04.1 LTS");
}

#[tokio::test]
async fn test_os_release_version_id_fallback() {
    let system = FakeSystem::with_os_release("NAME=Alpine\nVERSION_ID=3.19\n");
    let snapshot = collector(system).collect("", &StaticEnvironment::new()).await;

    assert_eq!(snapshot.server_operating_system, "Alpine");
    assert_eq!(snapshot.server_operating_system_version, "3.19");
}

#[tokio::test]
async fn test_lsb_release_fills_missing_fields_only() {
    let system = Arc::new(FakeSystem {
        os_release: Some("NAME=\"Debian GNU/Linux\"\n".to_string()),
        lsb_distributor: Some("Debian".to_string()),
        lsb_release: Some(" 12 \n".to_string()),
        ..FakeSystem::default()
    });
    let snapshot = StatusCollector::new(build_info(), system.clone())
        .collect("", &StaticEnvironment::new())
        .await;

    assert_eq!(snapshot.server_operating_system, "Debian GNU/Linux");
    assert_eq!(snapshot.server_operating_system_version, "12");
    assert_eq!(system.lsb_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_file_and_utility_fall_back_to_kernel() {
    let snapshot = collector(FakeSystem::default())
        .collect("", &StaticEnvironment::new())
        .await;

    assert!(!snapshot.server_operating_system.is_empty());
    assert!(!snapshot.server_operating_system_version.is_empty());
    assert_eq!(snapshot.server_operating_system, "Linux");
}

// ---------------------------------------------------------------------------
// Server address
// ---------------------------------------------------------------------------

fn ip(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

fn network_system() -> FakeSystem {
    let mut dns = HashMap::new();
    dns.insert("web-01".to_string(), ip(10, 0, 0, 5));
    FakeSystem {
        host_name: Some("web-01".to_string()),
        dns,
        outbound: Some(ip(172, 16, 0, 9)),
        ..FakeSystem::default()
    }
}

#[tokio::test]
async fn test_connection_local_address_wins() {
    let env = StaticEnvironment::new()
        .with_local_addr(ip(192, 168, 1, 10))
        .with_header("X-Server-Addr", "10.9.9.9");
    let snapshot = collector(network_system()).collect("", &env).await;

    assert_eq!(snapshot.server_ip.as_deref(), Some("192.168.1.10"));
}

#[tokio::test]
async fn test_unspecified_local_address_is_skipped() {
    let env = StaticEnvironment::new()
        .with_local_addr(ip(0, 0, 0, 0))
        .with_header("X-Server-Addr", "10.9.9.9");
    let snapshot = collector(network_system()).collect("", &env).await;

    assert_eq!(snapshot.server_ip.as_deref(), Some("10.9.9.9"));
}

#[tokio::test]
async fn test_malformed_forwarded_header_is_skipped() {
    let env = StaticEnvironment::new().with_header("X-Server-Addr", "not-an-ip");
    let snapshot = collector(network_system()).collect("", &env).await;

    assert_eq!(snapshot.server_ip.as_deref(), Some("10.0.0.5"));
}

#[tokio::test]
async fn test_host_name_resolution_before_udp_route() {
    let system = Arc::new(network_system());
    let snapshot = StatusCollector::new(build_info(), system.clone())
        .collect("", &StaticEnvironment::new())
        .await;

    assert_eq!(snapshot.server_ip.as_deref(), Some("10.0.0.5"));
    assert_eq!(system.dns_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_hostname_variable_beats_system_host_name() {
    let mut system = network_system();
    system.dns.insert("app.internal".to_string(), ip(10, 0, 0, 77));
    let env = StaticEnvironment::new().with_var("HOSTNAME", "app.internal");
    let snapshot = collector(system).collect("", &env).await;

    assert_eq!(snapshot.server_ip.as_deref(), Some("10.0.0.77"));
}

#[tokio::test]
async fn test_failed_resolution_falls_back_to_udp_route() {
    let system = FakeSystem {
        host_name: Some("unknown-host".to_string()),
        outbound: Some(ip(172, 16, 0, 9)),
        ..FakeSystem::default()
    };
    let snapshot = collector(system).collect("", &StaticEnvironment::new()).await;

    assert_eq!(snapshot.server_ip.as_deref(), Some("172.16.0.9"));
}

#[tokio::test]
async fn test_resolution_echoing_the_name_is_ignored() {
    let mut dns = HashMap::new();
    dns.insert("10.1.1.1".to_string(), ip(10, 1, 1, 1));
    let system = FakeSystem {
        host_name: Some("10.1.1.1".to_string()),
        dns,
        outbound: Some(ip(172, 16, 0, 9)),
        ..FakeSystem::default()
    };
    let snapshot = collector(system).collect("", &StaticEnvironment::new()).await;

    assert_eq!(snapshot.server_ip.as_deref(), Some("172.16.0.9"));
}

#[tokio::test]
async fn test_no_address_source_yields_null() {
    let snapshot = collector(FakeSystem::default())
        .collect("", &StaticEnvironment::new())
        .await;

    assert_eq!(snapshot.server_ip, None);
    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json["serverIp"].is_null());
}

#[tokio::test]
async fn test_request_host_is_never_probed() {
    let system = Arc::new(FakeSystem::default());
    let snapshot = StatusCollector::new(build_info(), system.clone())
        .collect("evil.example; rm -rf /", &StaticEnvironment::new())
        .await;

    assert_eq!(snapshot.host, "evil.example; rm -rf /");
    assert_eq!(system.dns_calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Database identity
// ---------------------------------------------------------------------------

async fn collect_with(database: FakeDatabase) -> Snapshot {
    collector(FakeSystem::default())
        .with_database(Arc::new(database))
        .collect("", &StaticEnvironment::new())
        .await
}

#[tokio::test]
async fn test_mysql_platform_reporting_mariadb_is_reclassified() {
    let snapshot =
        collect_with(FakeDatabase::new("mysql").answer("SELECT VERSION()", "10.11.4-MariaDB")).await;

    assert_eq!(snapshot.db_server.as_deref(), Some("MariaDB"));
    assert_eq!(snapshot.db_version.as_deref(), Some("10.11.4-MariaDB"));
    assert_eq!(snapshot.db_error, None);
}

#[tokio::test]
async fn test_plain_mysql_stays_mysql() {
    let snapshot = collect_with(FakeDatabase::new("MySQL").answer("SELECT VERSION()", "8.0.36")).await;

    assert_eq!(snapshot.db_server.as_deref(), Some("MySQL"));
    assert_eq!(snapshot.db_version.as_deref(), Some("8.0.36"));
}

#[tokio::test]
async fn test_no_database_is_null_without_error() {
    let snapshot = collector(FakeSystem::default())
        .collect("", &StaticEnvironment::new())
        .await;

    assert_eq!((snapshot.db_server, snapshot.db_version), (None, None));
    assert_eq!(snapshot.db_error, None);
}

#[tokio::test]
async fn test_postgres_version_failure_keeps_server() {
    let snapshot = collect_with(
        FakeDatabase::new("PostgreSQL")
            .fail("SHOW server_version", "permission denied")
            .fail("SELECT version()", "permission denied"),
    )
    .await;

    assert_eq!(snapshot.db_server.as_deref(), Some("PostgreSQL"));
    assert_eq!(snapshot.db_version, None);
    assert!(snapshot.db_error.is_some());
}

#[tokio::test]
async fn test_postgres_second_version_query_is_used() {
    let snapshot = collect_with(
        FakeDatabase::new("postgresql")
            .fail("SHOW server_version", "unrecognized configuration parameter")
            .answer("SELECT version()", "PostgreSQL 16.2 on x86_64-pc-linux-gnu"),
    )
    .await;

    assert_eq!(snapshot.db_server.as_deref(), Some("PostgreSQL"));
    assert_eq!(
        snapshot.db_version.as_deref(),
        Some("PostgreSQL 16.2 on x86_64-pc-linux-gnu")
    );
    assert_eq!(snapshot.db_error, None);
}

#[tokio::test]
async fn test_sqlite_version_query() {
    let snapshot =
        collect_with(FakeDatabase::new("SQLite").answer("SELECT sqlite_version()", "3.45.1")).await;

    assert_eq!(snapshot.db_server.as_deref(), Some("SQLite"));
    assert_eq!(snapshot.db_version.as_deref(), Some("3.45.1"));
}

#[tokio::test]
async fn test_platform_failure_uses_driver_hint_and_reports_first_error() {
    let database = FakeDatabase {
        platform: Err("Connection refused (os error 111)".to_string()),
        hint: Some("mysql".to_string()),
        answers: HashMap::new(),
    };
    let snapshot = collect_with(database).await;

    assert_eq!(snapshot.db_server.as_deref(), Some("MySQL"));
    assert_eq!(snapshot.db_version, None);
    assert_eq!(
        snapshot.db_error.as_deref(),
        Some("Connection failed: Connection refused (os error 111)")
    );
}

#[tokio::test]
async fn test_platform_failure_without_hint_leaves_server_null() {
    let database = FakeDatabase {
        platform: Err("no route to host".to_string()),
        hint: None,
        answers: HashMap::new(),
    };
    let snapshot = collect_with(database).await;

    assert_eq!(snapshot.db_server, None);
    assert_eq!(snapshot.db_version, None);
    assert!(snapshot.db_error.is_some());
}

#[tokio::test]
async fn test_unknown_platform_is_reported_verbatim() {
    let snapshot =
        collect_with(FakeDatabase::new("CockroachDB").answer("SELECT VERSION()", "v23.2.1")).await;

    assert_eq!(snapshot.db_server.as_deref(), Some("CockroachDB"));
    assert_eq!(snapshot.db_version.as_deref(), Some("v23.2.1"));
}
