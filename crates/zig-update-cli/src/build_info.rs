//! Build-time identification of the binary.

use std::fmt;

/// Name, version and provenance of this build, fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    /// Program name.
    pub name: &'static str,
    /// Release version, from git tags when the build had them.
    pub version: &'static str,
    /// Short commit hash, or `HEAD` outside a git checkout.
    pub revision: &'static str,
    /// Compiler that produced the binary.
    pub rustc: &'static str,
}

impl BuildInfo {
    /// Information stamped in by the build script.
    pub const fn current() -> Self {
        Self {
            name: "zig-update",
            version: env!("ZIG_UPDATE_VERSION"),
            revision: env!("ZIG_UPDATE_REVISION"),
            rustc: env!("ZIG_UPDATE_RUSTC"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (rev: {}/{})",
            self.name, self.version, self.revision, self.rustc
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let info = BuildInfo {
            name: "zig-update",
            version: "0.1.0",
            revision: "abc1234",
            rustc: "rustc 1.85.0",
        };
        assert_eq!(info.to_string(), "zig-update 0.1.0 (rev: abc1234/rustc 1.85.0)");
    }

    #[test]
    fn current_is_stamped() {
        let info = BuildInfo::current();
        assert!(!info.version.is_empty());
        assert!(!info.revision.is_empty());
    }
}
