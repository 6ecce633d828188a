//! Domain types for the status snapshot.
//!
//! These are pure data types with no I/O. Probes produce the identity
//! types; the collector folds them into a [`Snapshot`].

mod build_info;
mod identity;
mod snapshot;

pub use build_info::{BuildInfo, major_minor};
pub use identity::{DbIdentity, KernelInfo, OsIdentity};
pub use snapshot::Snapshot;
