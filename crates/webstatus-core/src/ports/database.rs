//! Database handle port.
//!
//! The collector only needs three capabilities from a live connection: the
//! platform it reports, a hint from its connection parameters, and a
//! read-only scalar query. Absence of a handle is a normal state.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a database handle.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No connection could be obtained.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A query was rejected or failed mid-flight.
    #[error("Query failed: {0}")]
    Query(String),
}

/// A live (possibly lazily connected) database connection.
#[async_trait]
pub trait DatabaseHandle: Send + Sync {
    /// Platform/dialect identifier, e.g. `"MySQL"` or `"PostgreSQL"`.
    async fn platform(&self) -> Result<String, DatabaseError>;

    /// Driver identifier from the connection parameters (e.g. the URL
    /// scheme), available without touching the network.
    fn driver_hint(&self) -> Option<String>;

    /// Run a read-only query and return the first column of the first row.
    async fn query_scalar(&self, sql: &str) -> Result<Option<String>, DatabaseError>;
}
