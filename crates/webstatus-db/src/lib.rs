#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

pub mod handle;
pub mod setup;

pub use handle::{SqlxDatabase, UnavailableDatabase};

// Re-export setup functions for convenient access
pub use setup::{connect_database, open_database};
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
