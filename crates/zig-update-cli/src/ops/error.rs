//! Errors for the update pipeline

use thiserror::Error;
use zig_update_core::io::download::DownloadError;
use zig_update_core::io::index::FetchError;
use zig_update_schema::IndexError;

/// Failure of one step of an update. Every variant is fatal.
///
/// Messages name the failed step only; the underlying error is carried as the
/// source and printed by the caller's error chain.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The HTTP client could not be constructed.
    #[error("Failed to set up HTTP client")]
    Client(#[source] reqwest::Error),

    /// The release index could not be fetched or decoded.
    #[error("Failed to fetch release index")]
    Fetch(#[from] FetchError),

    /// The version or platform is not in the index.
    #[error(transparent)]
    Resolve(#[from] IndexError),

    /// The archive could not be downloaded or unpacked.
    #[error("Download failed")]
    Download(#[from] DownloadError),
}
