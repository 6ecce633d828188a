//! Build/version metadata shared across webstatus frontends.
#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]

/// The `SemVer` version of the build (from Cargo).
pub const SEMVER: &str = env!("CARGO_PKG_VERSION");

/// Name of the web framework the status endpoint is served by.
pub const FRAMEWORK: &str = env!("WEBSTATUS_FRAMEWORK");

/// Locked version of [`FRAMEWORK`], or `"unknown"` when no lockfile was
/// available at build time.
pub const FRAMEWORK_VERSION: &str = env!("WEBSTATUS_FRAMEWORK_VERSION");

/// Semver of the rustc toolchain that compiled this build, or `"unknown"`.
pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// The git SHA emitted by the build script.
///
/// This is expected to be a 7-character hex string when available; otherwise it
/// is set to `"unknown"`.
pub const GIT_SHA_SHORT: &str = env!("VERGEN_GIT_SHA");

/// True if the git SHA looks like a short hex hash.
pub const HAS_GIT_SHA: bool = is_short_hex(GIT_SHA_SHORT);

/// The “nice” version string used by CLI `--version` output.
///
/// Examples:
/// - `0.3.0 (a1b2c3d)`
/// - `0.3.0` (when git data is unavailable)
pub const LONG_VERSION_WITH_SHA: &str =
    concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");

pub const LONG_VERSION: &str = if HAS_GIT_SHA {
    LONG_VERSION_WITH_SHA
} else {
    SEMVER
};

/// Server software identifier reported when the host does not provide one.
pub const SERVER_SOFTWARE: &str = concat!("webstatus/", env!("CARGO_PKG_VERSION"));

const fn is_short_hex(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 7 {
        return false;
    }

    let mut i = 0;
    while i < 7 {
        let c = bytes[i];
        let is_digit = c >= b'0' && c <= b'9';
        let is_lower = c >= b'a' && c <= b'f';
        let is_upper = c >= b'A' && c <= b'F';
        if !(is_digit || is_lower || is_upper) {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex_detection() {
        assert!(is_short_hex("a1b2c3d"));
        assert!(is_short_hex("ABCDEF0"));
        assert!(!is_short_hex("unknown"));
        assert!(!is_short_hex("a1b2c3"));
        assert!(!is_short_hex("a1b2c3g"));
    }

    #[test]
    fn test_long_version_starts_with_semver() {
        assert!(LONG_VERSION.starts_with(SEMVER));
    }

    #[test]
    fn test_server_software_names_the_crate() {
        assert!(SERVER_SOFTWARE.starts_with("webstatus/"));
        assert!(SERVER_SOFTWARE.ends_with(SEMVER));
    }

    #[test]
    fn test_framework_metadata_is_never_empty() {
        assert_eq!(FRAMEWORK, "axum");
        assert!(!FRAMEWORK_VERSION.is_empty());
        assert!(!RUSTC_SEMVER.is_empty());
    }
}
