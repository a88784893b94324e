//! Build script to stamp version and revision into the binary
//!
//! The version comes from git tags when available, so it does not have to be
//! kept in sync with Cargo.toml by hand.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    // Rerun if git HEAD changes
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    let version = git(&["describe", "--tags", "--always", "--dirty=-dev"])
        .map(|s| s.trim_start_matches('v').to_string())
        .filter(|s| s.contains('.'))
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    let revision = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "HEAD".to_string());

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "rustc".to_string(), |s| s.trim().to_string());

    println!("cargo:rustc-env=ZIG_UPDATE_VERSION={version}");
    println!("cargo:rustc-env=ZIG_UPDATE_REVISION={revision}");
    println!("cargo:rustc-env=ZIG_UPDATE_RUSTC={rustc_version}");
}
