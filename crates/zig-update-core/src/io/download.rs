//! Archive download feeding straight into extraction.
//!
//! Tar formats are decoded while the body streams in; zip needs random access
//! to its central directory, so the body is buffered in memory first.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio_util::io::{StreamReader, SyncIoBridge};

use crate::Reporter;
use crate::io::extract::{
    ArchiveFormat, ExtractError, ExtractSummary, extract_tar_gz, extract_tar_xz,
    extract_zip_bytes,
};
use crate::io::prepare::prepare_destination;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("archive request failed")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Request for a download operation
pub struct DownloadRequest<'a, R: Reporter + Clone + 'static> {
    pub client: &'a Client,
    pub url: &'a str,
    pub dest: &'a Path,
    pub reporter: &'a R,
}

impl<'a, R: Reporter + Clone + 'static> DownloadRequest<'a, R> {
    pub fn new(client: &'a Client, url: &'a str, dest: &'a Path, reporter: &'a R) -> Self {
        Self {
            client,
            url,
            dest,
            reporter,
        }
    }

    /// Execute the download, replacing `dest` with the archive contents.
    pub async fn execute(self) -> Result<ExtractSummary, DownloadError> {
        download_and_extract(self).await
    }
}

/// Downloads an archive, clears the destination, and extracts into it.
///
/// The format is checked before any request is made. The destination is only
/// touched once the archive request has succeeded.
pub async fn download_and_extract<R: Reporter + Clone + 'static>(
    req: DownloadRequest<'_, R>,
) -> Result<ExtractSummary, DownloadError> {
    let DownloadRequest {
        client,
        url,
        dest,
        reporter,
    } = req;

    let format = ArchiveFormat::from_url(url)?;
    tracing::debug!("Downloading {format} archive from {url}");

    let response = client.get(url).send().await?.error_for_status()?;
    let total_size = response.content_length();
    reporter.downloading(0, total_size);

    prepare_destination(dest)?;

    let extract_dest = dest.to_path_buf();
    let extract_reporter = reporter.clone();

    let summary = match format {
        ArchiveFormat::Zip => {
            let body = buffer_body(response, total_size, reporter).await?;
            tokio::task::spawn_blocking(move || {
                extract_zip_bytes(&body, total_size, &extract_dest, &extract_reporter)
            })
            .await
            .map_err(std::io::Error::other)??
        }
        ArchiveFormat::TarGz | ArchiveFormat::TarXz => {
            let progress = reporter.clone();
            let mut downloaded: u64 = 0;
            let stream = response.bytes_stream().map(move |chunk| {
                let chunk = chunk.map_err(std::io::Error::other)?;
                downloaded += chunk.len() as u64;
                progress.downloading(downloaded, total_size);
                Ok::<_, std::io::Error>(chunk)
            });
            let body = SyncIoBridge::new(StreamReader::new(Box::pin(stream)));

            tokio::task::spawn_blocking(move || {
                if format == ArchiveFormat::TarGz {
                    extract_tar_gz(body, &extract_dest, &extract_reporter)
                } else {
                    extract_tar_xz(body, &extract_dest, &extract_reporter)
                }
            })
            .await
            .map_err(std::io::Error::other)??
        }
    };

    tracing::debug!(
        "Extracted {} files and {} directories ({} skipped)",
        summary.files,
        summary.directories,
        summary.skipped
    );
    Ok(summary)
}

async fn buffer_body<R: Reporter>(
    response: reqwest::Response,
    total_size: Option<u64>,
    reporter: &R,
) -> Result<Vec<u8>, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut body = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            // A body that ends before Content-Length is a short download, not a transport failure.
            Err(e) => {
                let actual = body.len() as u64;
                return Err(match total_size {
                    Some(expected) if actual < expected => {
                        tracing::debug!("Archive body ended early: {e}");
                        ExtractError::IncompleteDownload { expected, actual }.into()
                    }
                    _ => e.into(),
                });
            }
        };
        body.extend_from_slice(&chunk);
        reporter.downloading(body.len() as u64, total_size);
    }

    Ok(body)
}
