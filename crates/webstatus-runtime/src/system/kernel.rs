//! Kernel identification.

use sysinfo::System;
use webstatus_core::KernelInfo;
use webstatus_core::probes::PROBE_TARGET;

/// Kernel name, release and node name from `uname(2)`.
#[cfg(unix)]
pub fn kernel_info() -> KernelInfo {
    match nix::sys::utsname::uname() {
        Ok(uts) => KernelInfo {
            name: uts.sysname().to_string_lossy().into_owned(),
            release: uts.release().to_string_lossy().into_owned(),
            node_name: uts.nodename().to_string_lossy().into_owned(),
        },
        Err(err) => {
            tracing::debug!(target: PROBE_TARGET, error = %err, "uname failed, using sysinfo");
            sysinfo_kernel_info()
        }
    }
}

/// Kernel identification from `sysinfo`.
#[cfg(not(unix))]
pub fn kernel_info() -> KernelInfo {
    sysinfo_kernel_info()
}

fn sysinfo_kernel_info() -> KernelInfo {
    KernelInfo {
        name: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        release: System::kernel_version().unwrap_or_default(),
        node_name: System::host_name().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_name_and_release_are_present() {
        let kernel = kernel_info();
        assert!(!kernel.name.is_empty());
        assert!(!kernel.release.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_kernel_name() {
        assert_eq!(kernel_info().name, "Linux");
    }
}
