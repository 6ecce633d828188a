//! Database engine and version detection.

use std::fmt;

use super::PROBE_TARGET;
use crate::domain::DbIdentity;
use crate::ports::{DatabaseError, DatabaseHandle};

/// Database dialect families with a display name and version queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    MariaDb,
    PostgreSql,
    Sqlite,
    SqlServer,
    Oracle,
    /// An identifier outside the table, reported verbatim.
    Other(String),
}

impl Dialect {
    /// Map a platform or driver identifier (case-insensitive).
    pub fn from_identifier(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "mysql" => Self::MySql,
            "mariadb" => Self::MariaDb,
            "postgresql" | "postgres" | "pgsql" => Self::PostgreSql,
            "sqlite" | "sqlite3" => Self::Sqlite,
            "sqlsrv" | "mssql" | "sqlserver" => Self::SqlServer,
            "oracle" | "oci8" => Self::Oracle,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Resolve a reported platform, consulting the driver hint when the
    /// platform itself is not in the table.
    pub fn resolve(platform: &str, driver_hint: Option<&str>) -> Self {
        match Self::from_identifier(platform) {
            Self::Other(raw) => driver_hint
                .map(Self::from_identifier)
                .filter(Self::is_known)
                .unwrap_or(Self::Other(raw)),
            known => known,
        }
    }

    /// Whether the dialect is one of the table entries.
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Human-readable engine name.
    pub fn display_name(&self) -> &str {
        match self {
            Self::MySql => "MySQL",
            Self::MariaDb => "MariaDB",
            Self::PostgreSql => "PostgreSQL",
            Self::Sqlite => "SQLite",
            Self::SqlServer => "SQL Server",
            Self::Oracle => "Oracle",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Version queries to try, in order. The first non-empty scalar wins.
    pub const fn version_queries(&self) -> &'static [&'static str] {
        match self {
            Self::PostgreSql => &["SHOW server_version", "SELECT version()"],
            Self::Sqlite => &["SELECT sqlite_version()"],
            _ => &["SELECT VERSION()"],
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identify the database engine behind `handle`.
///
/// Never fails. Whatever was determined before a failure is kept and the
/// first failure is recorded in [`DbIdentity::error`]. No handle means no
/// database and yields an empty identity.
pub async fn detect_database(handle: Option<&dyn DatabaseHandle>) -> DbIdentity {
    let mut identity = DbIdentity::default();
    let Some(handle) = handle else {
        return identity;
    };
    let hint = handle.driver_hint();

    let dialect = match handle.platform().await {
        Ok(platform) => Dialect::resolve(&platform, hint.as_deref()),
        Err(err) => {
            tracing::warn!(target: PROBE_TARGET, error = %err, "database platform lookup failed");
            let unreachable = matches!(err, DatabaseError::Connection(_));
            identity.note_error(err.to_string());
            let Some(dialect) = hint
                .as_deref()
                .map(Dialect::from_identifier)
                .filter(Dialect::is_known)
            else {
                return identity;
            };
            if unreachable {
                // The version query would fail the same way.
                identity.server = Some(dialect.to_string());
                return identity;
            }
            dialect
        }
    };
    identity.server = Some(dialect.to_string());

    match query_version(handle, &dialect).await {
        Ok(version) => identity.version = version,
        Err(err) => {
            tracing::warn!(target: PROBE_TARGET, dialect = %dialect, error = %err, "database version query failed");
            identity.note_error(err.to_string());
        }
    }

    // MariaDB drivers and servers report themselves as MySQL.
    let reports_mariadb = identity
        .version
        .as_deref()
        .is_some_and(|version| version.to_ascii_lowercase().contains("mariadb"));
    if dialect == Dialect::MySql && reports_mariadb {
        identity.server = Some(Dialect::MariaDb.to_string());
    }

    identity
}

async fn query_version(
    handle: &dyn DatabaseHandle,
    dialect: &Dialect,
) -> Result<Option<String>, DatabaseError> {
    let mut last_error = None;
    for &sql in dialect.version_queries() {
        match handle.query_scalar(sql).await {
            Ok(Some(version)) if !version.trim().is_empty() => {
                return Ok(Some(version.trim().to_string()));
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(target: PROBE_TARGET, query = sql, error = %err, "version query failed");
                last_error = Some(err);
            }
        }
    }
    last_error.map_or(Ok(None), Err)
}
