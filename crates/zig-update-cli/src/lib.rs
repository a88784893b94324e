//! zig-update - fetch and unpack Zig toolchain releases
#![allow(clippy::missing_errors_doc)]
//!
//! Reads the published release index, resolves a version and platform to an
//! archive, and unpacks that archive into a directory, replacing whatever was
//! there before.
//!
//! # Pipeline
//!
//! ```text
//! fetch index -> resolve (version, platform) -> GET archive -> clear destination -> extract
//! ```
//!
//! Every step is fatal on failure; nothing is retried.

pub mod build_info;
pub mod ops;
pub mod ui;

pub use build_info::BuildInfo;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use zig_update_core::ClientConfig;
use zig_update_core::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
use zig_update_schema::{DEFAULT_INDEX_URL, MASTER};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "zig-update")]
#[command(about = "Download a Zig toolchain release and unpack it into a directory")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print the version and build information
    #[arg(short = 'v', long = "version")]
    pub show_version: bool,

    /// Zig version to download
    #[arg(
        short = 'd',
        long = "download-version",
        value_name = "VERSION",
        default_value = MASTER
    )]
    pub download_version: String,

    /// Release index URL
    #[arg(long, env = "ZIG_UPDATE_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,

    /// Seconds allowed to establish a connection
    #[arg(
        long,
        env = "ZIG_UPDATE_CONNECT_TIMEOUT",
        value_name = "SECS",
        default_value_t = DEFAULT_CONNECT_TIMEOUT.as_secs()
    )]
    pub connect_timeout: u64,

    /// Seconds a single read may stall
    #[arg(
        long,
        env = "ZIG_UPDATE_READ_TIMEOUT",
        value_name = "SECS",
        default_value_t = DEFAULT_READ_TIMEOUT.as_secs()
    )]
    pub read_timeout: u64,

    /// Do not print each extracted path
    #[arg(short, long)]
    pub quiet: bool,

    /// Platform to install, one of those listed under Arch
    #[arg(value_name = "TYPE")]
    pub platform: Option<String>,

    /// Directory to install into; its previous contents are removed
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

impl Cli {
    /// HTTP client settings derived from the flags.
    pub fn client_config(&self, build: &BuildInfo) -> ClientConfig {
        ClientConfig::default()
            .with_user_agent(format!("{}/{}", build.name, build.version))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout))
            .with_read_timeout(Duration::from_secs(self.read_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["zig-update", "x86_64-linux", "/opt/zig"]).unwrap();
        assert_eq!(cli.download_version, "master");
        assert_eq!(cli.platform.as_deref(), Some("x86_64-linux"));
        assert_eq!(cli.path, Some(PathBuf::from("/opt/zig")));
        assert!(!cli.show_version);
        assert!(!cli.quiet);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["zig-update", "-v"]).unwrap();
        assert!(cli.show_version);

        let cli =
            Cli::try_parse_from(["zig-update", "-d", "0.13.0", "-q", "aarch64-macos", "zig"])
                .unwrap();
        assert_eq!(cli.download_version, "0.13.0");
        assert!(cli.quiet);
    }

    #[test]
    fn positionals_are_optional() {
        let cli = Cli::try_parse_from(["zig-update"]).unwrap();
        assert!(cli.platform.is_none());
        assert!(cli.path.is_none());
    }

    #[test]
    fn too_many_positionals_rejected() {
        assert!(Cli::try_parse_from(["zig-update", "a", "b", "c"]).is_err());
    }

    #[test]
    fn client_config_uses_flags() {
        let cli = Cli::try_parse_from([
            "zig-update",
            "--connect-timeout",
            "5",
            "--read-timeout",
            "7",
        ])
        .unwrap();
        let config = cli.client_config(&BuildInfo::current());
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(7));
        assert!(config.user_agent.starts_with("zig-update/"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
