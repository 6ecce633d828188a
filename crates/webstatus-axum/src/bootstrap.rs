//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together for
//! the status endpoint. All concrete implementations are instantiated here.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use webstatus_core::{Settings, SettingsError, StatusCollector, validate_settings};
use webstatus_db::open_database;
use webstatus_runtime::{DefaultSystemProbe, build_info};

use crate::auth::AccessToken;
use crate::environment::ServerAddr;

/// Server configuration for the Axum adapter.
#[derive(Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: SocketAddr,
    /// Access token for `/status.json`.
    pub token: String,
    /// Collector settings.
    pub settings: Settings,
}

impl ServerConfig {
    /// Validate settings and extract what serving needs.
    pub fn from_settings(settings: Settings) -> Result<Self, SettingsError> {
        validate_settings(&settings)?;
        let token = settings.require_token()?.to_string();
        let bind = settings.bind_addr()?;
        Ok(Self {
            bind,
            token,
            settings,
        })
    }

    /// Listen on another address.
    #[must_use]
    pub const fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("token", &"<redacted>")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Application context for the Axum adapter.
#[derive(Debug)]
pub struct AxumContext {
    /// The status collector.
    pub collector: StatusCollector,
    /// Token clients must present.
    pub token: AccessToken,
}

/// Build the collector described by `settings`.
///
/// Shared by every entry point. A database URL that cannot be parsed does
/// not fail: the collector reports the problem in `dbError`.
pub fn build_collector(settings: &Settings) -> StatusCollector {
    let os_release = settings.effective_os_release_path();
    let probe = DefaultSystemProbe::new().with_os_release_path(os_release);

    let mut collector = StatusCollector::new(build_info(), Arc::new(probe))
        .with_environment(settings.effective_environment())
        .with_lifecycle(settings.end_of_maintenance, settings.end_of_life);

    if let Some(url) = settings.database_url.as_deref() {
        collector = collector.with_database(open_database(url));
    }

    tracing::info!(
        target: "webstatus.bootstrap",
        environment = collector.environment(),
        database = collector.has_database(),
        os_release = os_release,
        "Status collector ready"
    );

    collector
}

/// Bootstrap the Axum context.
pub fn bootstrap(config: &ServerConfig) -> AxumContext {
    AxumContext {
        collector: build_collector(&config.settings),
        token: AccessToken::new(&config.token),
    }
}

/// Start the web server and run until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config);
    let app = crate::routes::create_router(ctx);

    let listener = TcpListener::bind(config.bind).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "webstatus listening on http://{addr}/status.json");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<ServerAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("webstatus stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
