//! Host platform detection.

/// Platform identifier of the running host, in the index's `<arch>-<os>` form.
///
/// The index names platforms the way the Zig target triple does, which mostly
/// matches Rust's `std::env::consts` values. `arm` is published as `armv7a`.
///
/// ```
/// let host = zig_update_schema::platform::host();
/// assert!(host.contains('-'));
/// ```
pub fn host() -> String {
    format!("{}-{}", arch_name(std::env::consts::ARCH), std::env::consts::OS)
}

fn arch_name(arch: &str) -> &str {
    match arch {
        "arm" => "armv7a",
        "powerpc64" if cfg!(target_endian = "little") => "powerpc64le",
        other => other,
    }
}
