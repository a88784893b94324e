//! Release index schema for zig-update.
//!
//! Typed view of the upstream `index.json`, plus the version ordering used
//! when listing releases.

pub mod index;
pub mod platform;
pub mod version;

// Re-exports
pub use index::{IndexError, PlatformArtifact, RESERVED_KEYS, ReleaseEntry, ReleaseIndex};
pub use version::MASTER;

/// Default location of the release index.
pub const DEFAULT_INDEX_URL: &str = "https://ziglang.org/download/index.json";
