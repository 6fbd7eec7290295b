// Build script to inject version information from git tags
//
// Standard Rust practice: Use a build script with git describe
// Alternative: Use 'vergen' or 'git-version' crates (adds dependency)
//
// This approach:
// - No runtime dependencies
// - Works in most environments (requires git at build time)
// - Falls back gracefully if git unavailable

use std::process::Command;

fn main() {
    // Get version from git describe, fallback to CARGO_PKG_VERSION
    let version = get_git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=DATAGRAPH_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

fn get_git_version() -> Option<String> {
    // git describe returns something like "v0.1.0", "v0.1.0-5-gabc123",
    // or "abc123-dirty"
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let version = String::from_utf8(output.stdout).ok()?;
    let version = version.trim();

    if let Some(stripped) = version.strip_prefix('v') {
        // Tagged version, possibly with commits/dirty suffix; keep the
        // version part up to the first '-'
        match stripped.find('-') {
            Some(dash) => Some(stripped[..dash].to_string()),
            None => Some(stripped.to_string()),
        }
    } else {
        // Not a tagged version, use CARGO_PKG_VERSION with git info
        let base_version = env!("CARGO_PKG_VERSION");
        Some(format!("{}-{}", base_version, version))
    }
}
