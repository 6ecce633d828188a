#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod probes;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{BuildInfo, DbIdentity, KernelInfo, OsIdentity, Snapshot};
pub use ports::{
    DatabaseError, DatabaseHandle, HostEnvironment, LsbField, ProbeError, ProbeResult,
    SERVER_ADDR_HEADER, StaticEnvironment, SystemProbePort,
};
pub use probes::{Dialect, OsRelease, ProbeChain, ProbeHit};
pub use services::StatusCollector;
pub use settings::{
    DEFAULT_BIND, DEFAULT_ENVIRONMENT, DEFAULT_OS_RELEASE_PATH, Settings, SettingsError,
    parse_lifecycle_date, validate_settings,
};
