//! Release index fetcher.

use reqwest::Client;
use thiserror::Error;
use zig_update_schema::{IndexError, ReleaseIndex};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("index request failed")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Download and decode the release index. One attempt, no retries.
pub async fn fetch_index(client: &Client, url: &str) -> Result<ReleaseIndex, FetchError> {
    tracing::debug!("Fetching release index from {url}");

    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    let index = ReleaseIndex::from_slice(&bytes)?;

    tracing::debug!("Release index lists {} versions", index.len());
    Ok(index)
}
