//! Results of the individual probes.

use serde::{Deserialize, Serialize};

/// Operating system name and version.
///
/// Both fields default to the empty string; the OS probe never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsIdentity {
    pub name: String,
    pub version: String,
}

/// Kernel identification as returned by `uname(2)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelInfo {
    /// Kernel name, e.g. `"Linux"` or `"Darwin"`.
    pub name: String,
    /// Kernel release, e.g. `"6.8.0-45-generic"`.
    pub release: String,
    /// Network node name of the host.
    pub node_name: String,
}

/// Database engine identity.
///
/// `error` carries the first diagnostic met while probing; the other fields
/// keep whatever was determined before the failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbIdentity {
    pub server: Option<String>,
    pub version: Option<String>,
    pub error: Option<String>,
}

impl DbIdentity {
    /// Record a diagnostic unless an earlier one is already present.
    pub fn note_error(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(message.into());
        }
    }
}
