//! Static build facts injected into the collector.

use serde::{Deserialize, Serialize};

/// Framework and runtime facts known at build time.
///
/// Adapters fill this from `webstatus-build-info`; tests construct it
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Framework name, e.g. `"axum"`.
    pub framework: String,
    /// Framework version, e.g. `"0.8.4"`.
    pub framework_version: String,
    /// Language runtime version, e.g. `"1.88.0"`.
    pub runtime_version: String,
    /// Server software reported when the host environment has none.
    pub server_software: String,
}

impl BuildInfo {
    /// Create build info with the given framework name and version.
    pub fn new(framework: impl Into<String>, framework_version: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            framework_version: framework_version.into(),
            runtime_version: String::new(),
            server_software: String::new(),
        }
    }

    /// Set the language runtime version.
    #[must_use]
    pub fn with_runtime_version(mut self, version: impl Into<String>) -> Self {
        self.runtime_version = version.into();
        self
    }

    /// Set the fallback server software identifier.
    #[must_use]
    pub fn with_server_software(mut self, software: impl Into<String>) -> Self {
        self.server_software = software.into();
        self
    }

    /// `"MAJOR.MINOR"` of the framework version.
    pub fn framework_major_version(&self) -> String {
        major_minor(&self.framework_version)
    }

    /// `"MAJOR.MINOR"` of the runtime version.
    pub fn runtime_major_version(&self) -> String {
        major_minor(&self.runtime_version)
    }
}

/// Reduce a semver-like version to `"MAJOR.MINOR"`.
///
/// Pre-release and build suffixes are dropped. Versions with fewer than two
/// components are returned unchanged.
pub fn major_minor(version: &str) -> String {
    let core = version
        .trim()
        .split(['-', '+', ' '])
        .next()
        .unwrap_or_default();

    let mut parts = core.split('.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor)) if !major.is_empty() && !minor.is_empty() => {
            format!("{major}.{minor}")
        }
        _ => version.trim().to_string(),
    }
}
