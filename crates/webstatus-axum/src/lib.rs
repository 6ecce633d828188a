#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

// Used by integration tests only
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod auth;
pub mod bootstrap;
pub mod environment;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use auth::AccessToken;
pub use bootstrap::{AxumContext, ServerConfig, bootstrap, build_collector, start_server};
pub use environment::{RequestEnvironment, ServerAddr};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
