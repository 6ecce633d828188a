//! `DatabaseHandle` implementations.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::AnyConnection;
use sqlx::any::AnyConnectOptions;
use sqlx::{ConnectOptions, Connection};

use webstatus_core::{DatabaseError, DatabaseHandle};

/// sqlx implementation of the `DatabaseHandle` trait.
///
/// Holds parsed connect options only. Every call opens one connection,
/// makes a single attempt bounded by the connect timeout, and closes it
/// before returning. A server that refuses connections fails fast with the
/// driver's own error.
#[derive(Debug, Clone)]
pub struct SqlxDatabase {
    options: AnyConnectOptions,
    driver: Option<String>,
    connect_timeout: Duration,
}

impl SqlxDatabase {
    /// Wrap parsed options. `url` only supplies the driver hint.
    pub fn new(options: AnyConnectOptions, url: &str, connect_timeout: Duration) -> Self {
        Self {
            options,
            driver: url_scheme(url),
            connect_timeout,
        }
    }

    /// Upper bound for opening a connection.
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    async fn connect(&self) -> Result<AnyConnection, DatabaseError> {
        match tokio::time::timeout(self.connect_timeout, self.options.connect()).await {
            Ok(conn) => conn.map_err(map_error),
            Err(_) => Err(DatabaseError::Connection(format!(
                "connect timed out after {}ms",
                self.connect_timeout.as_millis()
            ))),
        }
    }
}

async fn release(conn: AnyConnection) {
    if let Err(err) = conn.close().await {
        tracing::debug!(error = %err, "closing database connection failed");
    }
}

#[async_trait]
impl DatabaseHandle for SqlxDatabase {
    async fn platform(&self) -> Result<String, DatabaseError> {
        let conn = self.connect().await?;
        let platform = conn.backend_name().to_string();
        release(conn).await;
        Ok(platform)
    }

    fn driver_hint(&self) -> Option<String> {
        self.driver.clone()
    }

    async fn query_scalar(&self, sql: &str) -> Result<Option<String>, DatabaseError> {
        let mut conn = self.connect().await?;
        let value: Result<Option<Option<String>>, _> =
            sqlx::query_scalar(sql).fetch_optional(&mut conn).await;
        release(conn).await;
        Ok(value.map_err(map_error)?.flatten())
    }
}

/// Stand-in for a database whose URL could not even be parsed.
///
/// Keeps the URL scheme as driver hint and answers every call with the
/// original failure.
#[derive(Debug, Clone)]
pub struct UnavailableDatabase {
    driver: Option<String>,
    reason: String,
}

impl UnavailableDatabase {
    pub fn new(url: &str, reason: impl Into<String>) -> Self {
        Self {
            driver: url_scheme(url),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl DatabaseHandle for UnavailableDatabase {
    async fn platform(&self) -> Result<String, DatabaseError> {
        Err(DatabaseError::Connection(self.reason.clone()))
    }

    fn driver_hint(&self) -> Option<String> {
        self.driver.clone()
    }

    async fn query_scalar(&self, _sql: &str) -> Result<Option<String>, DatabaseError> {
        Err(DatabaseError::Connection(self.reason.clone()))
    }
}

/// Lowercased URL scheme (`mysql`, `postgres`, `sqlite`, ...).
pub(crate) fn url_scheme(url: &str) -> Option<String> {
    url.split_once(':')
        .map(|(scheme, _)| scheme.trim().to_ascii_lowercase())
        .filter(|scheme| !scheme.is_empty())
}

pub(crate) fn map_error(err: sqlx::Error) -> DatabaseError {
    match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => DatabaseError::Connection(err.to_string()),
        _ => DatabaseError::Query(err.to_string()),
    }
}
