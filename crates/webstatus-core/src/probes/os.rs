use super::{OsRelease, PROBE_TARGET, ProbeChain};
use crate::domain::OsIdentity;
use crate::ports::{LsbField, SystemProbePort};

/// Determine the operating system name and version.
///
/// Sources, per field: the os-release file, then `lsb_release`, then the
/// kernel identification. Never fails; a field nobody answers is empty.
pub async fn detect_os(system: &dyn SystemProbePort) -> OsIdentity {
    let release = match system.os_release() {
        Ok(Some(content)) => OsRelease::parse(&content),
        Ok(None) => OsRelease::default(),
        Err(err) => {
            tracing::debug!(target: PROBE_TARGET, error = %err, "os-release unavailable");
            OsRelease::default()
        }
    };

    let name = ProbeChain::new("os-name")
        .then_sync("os-release", || Ok(release.name().map(str::to_string)))
        .then_sync("lsb_release", || system.lsb_release(LsbField::Distributor))
        .then_sync("uname", || Ok(Some(system.kernel().name)))
        .first()
        .await;

    let version = ProbeChain::new("os-version")
        .then_sync("os-release", || Ok(release.version().map(str::to_string)))
        .then_sync("lsb_release", || system.lsb_release(LsbField::Release))
        .then_sync("uname", || Ok(Some(system.kernel().release)))
        .first()
        .await;

    OsIdentity {
        name: name.map(|hit| hit.value.trim().to_string()).unwrap_or_default(),
        version: version
            .map(|hit| hit.value.trim().to_string())
            .unwrap_or_default(),
    }
}
