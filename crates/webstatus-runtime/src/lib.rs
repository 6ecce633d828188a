#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

// Only the unix uname path logs
#[cfg(not(unix))]
use tracing as _;

mod build_info;
mod environment;
pub mod system;

pub use build_info::build_info;
pub use environment::ProcessEnvironment;

// Re-export system probe implementation
pub use system::DefaultSystemProbe;
