//! The update pipeline: index, resolve, download, extract.

use zig_update_core::Reporter;
use zig_update_core::io::download::DownloadRequest;
use zig_update_core::io::extract::ExtractSummary;
use zig_update_core::io::index::fetch_index;

use super::UpdateError;
use super::usage;
use crate::ui::Output;
use crate::{BuildInfo, Cli};

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Build information was printed; nothing was fetched.
    PrintedVersion,
    /// Arguments were missing and the usage text was printed.
    Usage,
    /// The archive was unpacked into the destination.
    Installed(ExtractSummary),
}

/// Run one invocation to completion.
///
/// Exactly one index request is made, followed by at most one archive
/// request. The destination is only cleared after the archive request
/// succeeds.
pub async fn run(cli: &Cli, output: &Output) -> Result<Outcome, UpdateError> {
    let build = BuildInfo::current();
    if cli.show_version {
        println!("{build}");
        return Ok(Outcome::PrintedVersion);
    }

    let client = cli
        .client_config(&build)
        .build_client()
        .map_err(UpdateError::Client)?;

    output.section("Fetching release index");
    let index = fetch_index(&client, &cli.index_url).await?;

    let (Some(platform), Some(dest)) = (cli.platform.as_deref(), cli.path.as_deref()) else {
        eprint!("{}", usage::render(&index, &cli.download_version));
        return Ok(Outcome::Usage);
    };

    let version = cli.download_version.as_str();
    let url = index.resolve_url(version, platform)?;
    let entry = index.entry(version)?;
    if let Some(full) = entry.version.as_deref().filter(|full| *full != version) {
        output.info(&format!("{version} is {full}"));
    }
    tracing::debug!("Resolved {version}/{platform} to {url}");

    output.section(&format!("Installing {platform} into {}", dest.display()));
    let summary = DownloadRequest::new(&client, url, dest, output)
        .execute()
        .await?;

    if summary.skipped > 0 {
        output.warning(&format!("{} links or special files were skipped", summary.skipped));
    }
    output.success(&format!(
        "Installed {} files and {} directories",
        summary.files, summary.directories
    ));
    Ok(Outcome::Installed(summary))
}
