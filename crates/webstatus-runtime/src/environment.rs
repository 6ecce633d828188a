use webstatus_core::HostEnvironment;

/// Host environment backed by the process environment.
///
/// Has no request: headers and the connection address are always absent.
/// The HTTP adapter layers its own request-scoped environment over this.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl HostEnvironment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
