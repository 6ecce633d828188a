//! The status collector.
//!
//! Owns immutable configuration plus `Arc` handles to the probe adapters and
//! folds the individual probe results into one [`Snapshot`] per call.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::domain::{BuildInfo, Snapshot};
use crate::ports::{DatabaseHandle, HostEnvironment, SystemProbePort};
use crate::probes::{detect_database, detect_os, detect_server_address};
use crate::settings::DEFAULT_ENVIRONMENT;

/// Environment variable a fronting server may use to name itself.
const SERVER_SOFTWARE_VAR: &str = "SERVER_SOFTWARE";

/// Builds status snapshots.
///
/// Safe to share across tasks: it holds no mutable state and every call
/// probes afresh.
#[derive(Clone)]
pub struct StatusCollector {
    build: BuildInfo,
    system: Arc<dyn SystemProbePort>,
    database: Option<Arc<dyn DatabaseHandle>>,
    environment: String,
    end_of_maintenance: Option<NaiveDate>,
    end_of_life: Option<NaiveDate>,
}

impl StatusCollector {
    /// Create a collector without a database and the default environment.
    pub fn new(build: BuildInfo, system: Arc<dyn SystemProbePort>) -> Self {
        Self {
            build,
            system,
            database: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            end_of_maintenance: None,
            end_of_life: None,
        }
    }

    /// Set the deployment environment name.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Set the framework lifecycle dates.
    #[must_use]
    pub const fn with_lifecycle(
        mut self,
        end_of_maintenance: Option<NaiveDate>,
        end_of_life: Option<NaiveDate>,
    ) -> Self {
        self.end_of_maintenance = end_of_maintenance;
        self.end_of_life = end_of_life;
        self
    }

    /// Attach a database handle.
    #[must_use]
    pub fn with_database(mut self, database: Arc<dyn DatabaseHandle>) -> Self {
        self.database = Some(database);
        self
    }

    /// Whether a database handle is attached.
    pub const fn has_database(&self) -> bool {
        self.database.is_some()
    }

    /// Configured environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Collect a fresh snapshot.
    ///
    /// `host` is echoed verbatim and never used for probing. Probes run in
    /// order and each degrades on its own; this call cannot fail.
    pub async fn collect(&self, host: &str, env: &dyn HostEnvironment) -> Snapshot {
        let system = self.system.as_ref();

        let os = detect_os(system).await;
        let kernel = system.kernel();
        let server_ip = detect_server_address(system, env).await;
        let db = detect_database(self.database.as_deref()).await;

        let server_software = env
            .var(SERVER_SOFTWARE_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.build.server_software.clone());

        tracing::debug!(
            os = %os.name,
            server_ip = server_ip.as_deref().unwrap_or("-"),
            db_server = db.server.as_deref().unwrap_or("-"),
            "collected status snapshot"
        );

        Snapshot {
            framework: self.build.framework.clone(),
            framework_version: self.build.framework_version.clone(),
            framework_major_version: self.build.framework_major_version(),
            framework_end_of_maintenance: self.end_of_maintenance,
            framework_end_of_life: self.end_of_life,
            environment: self.environment.clone(),
            runtime_major_version: self.build.runtime_major_version(),
            runtime_version: self.build.runtime_version.clone(),
            server_software,
            host: host.to_string(),
            server_operating_system: os.name,
            server_operating_system_version: os.version,
            server_name: kernel.node_name,
            server_ip,
            db_server: db.server,
            db_version: db.version,
            db_error: db.error,
            generated_at: Local::now().fixed_offset(),
        }
    }
}

impl std::fmt::Debug for StatusCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusCollector")
            .field("build", &self.build)
            .field("has_database", &self.has_database())
            .field("environment", &self.environment)
            .field("end_of_maintenance", &self.end_of_maintenance)
            .field("end_of_life", &self.end_of_life)
            .finish_non_exhaustive()
    }
}
