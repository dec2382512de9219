// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    // Re-run build script if git HEAD changes
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");

    // Check if version is already set (e.g., in flatpak builds)
    let version = match std::env::var("REALYOU_VERSION") {
        Ok(v) => v,
        Err(_) => describe_version(),
    };

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version string from `git describe`, falling back to the short commit
/// hash, then to the cargo package version when no repository is present.
fn describe_version() -> String {
    let described = run_git(&["describe", "--tags", "--always", "--match", "v*"]);

    match described {
        Some(version) => version.strip_prefix('v').unwrap_or(&version).to_string(),
        None => match run_git(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) => format!("{}-{}", env!("CARGO_PKG_VERSION"), hash),
            None => env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}

fn run_git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}
