//! Usage text shown when the platform or destination is missing.
//!
//! The text is built from the live index, so it always lists what can
//! actually be installed.

use std::fmt::Write;

use zig_update_schema::{ReleaseIndex, platform};

/// Render the usage text for `version`.
///
/// Lists the platforms offered by `version` under `Arch:` and every version in
/// the index under `Version:`. An unknown `version` is reported in place of
/// the platform list.
pub fn render(index: &ReleaseIndex, version: &str) -> String {
    let mut out = String::from("usage: zig-update [type] [path]\n");

    let _ = writeln!(out, "Arch:");
    match index.entry(version) {
        Ok(entry) => {
            for platform in entry.platforms() {
                let _ = writeln!(out, "  {platform}");
            }
        }
        Err(e) => {
            let _ = writeln!(out, "  ({e})");
        }
    }

    let _ = writeln!(out, "Version:");
    for id in index.versions() {
        let _ = writeln!(out, "  {id}");
    }

    let _ = writeln!(out, "Host: {}", platform::host());
    out
}
