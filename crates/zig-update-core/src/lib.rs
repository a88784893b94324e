//! Core library for zig-update: index fetching, destination preparation,
//! archive download and extraction.

pub mod config;
pub mod io;
pub mod reporter;

pub use config::ClientConfig;
pub use reporter::{NullReporter, Reporter};

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("zig-update-core/", env!("CARGO_PKG_VERSION"));
