pub mod cli;
pub mod core;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for install progress
    let default_filter = if cli.verbose {
        "info,modloader_installer=debug"
    } else {
        "warn,modloader_installer=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("modloader-installer {} starting", env!("CARGO_PKG_VERSION"));

    cli::execute(cli).await
}
