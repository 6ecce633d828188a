use std::{
    env, fs,
    path::{Path, PathBuf},
};

use vergen_gix::{Emitter, GixBuilder, RustcBuilder};

/// Package whose resolved version is reported as the framework version.
const FRAMEWORK_PACKAGE: &str = "axum";

fn main() {
    // Always rerun when this build script changes.
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    process_readme_for_rustdoc(&manifest_dir);
    emit_framework_version(Path::new(&manifest_dir));

    // Allow CI or packagers to provide a SHA without any git probing.
    println!("cargo:rerun-if-env-changed=WEBSTATUS_BUILD_SHA_SHORT");

    let override_sha = env::var("WEBSTATUS_BUILD_SHA_SHORT")
        .ok()
        .and_then(|s| normalize_sha_short(&s));

    // Best-effort probing via vergen-gix, but NEVER fail the build.
    // Whatever vergen cannot provide is emitted as an explicit fallback so
    // `env!()` never fails.
    let repo_root = if override_sha.is_some() {
        None
    } else {
        find_repo_root(Path::new(&manifest_dir))
    };
    let probes_git = repo_root.is_some();

    if let Err(err) = emit_vergen(repo_root) {
        println!("cargo:warning=webstatus-build-info: vergen emit failed: {err}");
        emit_vergen_fallbacks(override_sha.as_deref(), true);
        return;
    }

    if !probes_git {
        emit_vergen_fallbacks(override_sha.as_deref(), false);
    }
}

fn emit_vergen(repo_root: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let rustc = RustcBuilder::default().semver(true).build()?;
    let mut emitter = Emitter::default();
    emitter.add_instructions(&rustc)?;

    if let Some(root) = repo_root {
        let git = GixBuilder::default()
            .repo_path(Some(root))
            .sha(true) // short SHA
            .dirty(false)
            .build()?;
        emitter.add_instructions(&git)?;
    }

    emitter.emit()?;
    Ok(())
}

fn emit_vergen_fallbacks(sha_short: Option<&str>, include_rustc: bool) {
    // These are the env vars the crate uses via `env!()`.
    // They MUST always be set, or compilation will fail.
    let sha = sha_short.unwrap_or("unknown");
    println!("cargo:rustc-env=VERGEN_GIT_SHA={sha}");
    if include_rustc {
        println!("cargo:rustc-env=VERGEN_RUSTC_SEMVER=unknown");
    }
}

/// Resolve the locked version of the framework package from the workspace
/// `Cargo.lock`, falling back to `"unknown"`.
fn emit_framework_version(manifest_dir: &Path) {
    let lockfile = manifest_dir
        .parent() // crates/
        .and_then(Path::parent) // workspace root
        .map(|root| root.join("Cargo.lock"));

    let version = lockfile
        .as_deref()
        .inspect(|path| println!("cargo:rerun-if-changed={}", path.display()))
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|content| locked_version(&content, FRAMEWORK_PACKAGE))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=WEBSTATUS_FRAMEWORK={FRAMEWORK_PACKAGE}");
    println!("cargo:rustc-env=WEBSTATUS_FRAMEWORK_VERSION={version}");
}

fn locked_version(lockfile: &str, package: &str) -> Option<String> {
    let name_line = format!("name = \"{package}\"");
    let mut lines = lockfile.lines().map(str::trim);

    while let Some(line) = lines.next() {
        if line != name_line {
            continue;
        }
        let version = lines.next()?.strip_prefix("version = ")?;
        return Some(version.trim_matches('"').to_string());
    }
    None
}

fn normalize_sha_short(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.len() >= 7 {
        &trimmed[..7]
    } else {
        trimmed
    };

    if candidate.len() == 7 && candidate.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(candidate.to_string())
    } else {
        None
    }
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");

    let readme_path = Path::new(crate_dir).join("README.md");
    let content = fs::read_to_string(readme_path).unwrap_or_default();

    // Strip 'src/' prefix and '.rs' extension so rustdoc resolves module links
    let rustdoc_content = content.replace("](src/", "](").replace(".rs)", ")");

    let out_dir = env::var("OUT_DIR").unwrap_or_default();
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    if let Err(err) = fs::write(dest_path, rustdoc_content) {
        println!("cargo:warning=webstatus-build-info: failed to write README: {err}");
    }
}
