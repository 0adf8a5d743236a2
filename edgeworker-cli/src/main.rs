//! Edgeworker CLI
//!
//! Creates live previews of edge workers:
//! - `edgeworker session` opens a preview session and prints it
//! - `edgeworker preview <script>` uploads a worker and prints its preview token
//!
//! Credentials come from `EDGEWORKER_*` environment variables.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod bundle;
mod cli;
mod commands;

use cli::Cli;
use edgeworker_client::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling preview negotiation");
            on_ctrl_c.cancel();
        }
    });

    commands::run(cli.command, cancel).await
}
