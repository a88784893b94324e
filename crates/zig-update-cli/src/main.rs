//! zig-update - download a Zig toolchain release into a directory

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zig_update_core::Reporter;

use zig_update_cli::Cli;
use zig_update_cli::ops::{Outcome, run};
use zig_update_cli::ui::Output;

async fn update(cli: &Cli, output: &Output) -> Result<Outcome> {
    run(cli, output)
        .await
        .with_context(|| format!("cannot install Zig {}", cli.download_version))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(cli.quiet);

    match update(&cli, &output).await {
        Ok(Outcome::Usage) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
