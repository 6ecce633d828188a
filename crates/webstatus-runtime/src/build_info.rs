use webstatus_core::BuildInfo;

/// Build facts of this binary, as seen by the collector.
pub fn build_info() -> BuildInfo {
    BuildInfo::new(
        webstatus_build_info::FRAMEWORK,
        webstatus_build_info::FRAMEWORK_VERSION,
    )
    .with_runtime_version(webstatus_build_info::RUSTC_SEMVER)
    .with_server_software(webstatus_build_info::SERVER_SOFTWARE)
}
