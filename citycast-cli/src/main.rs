//! Binary crate for the `citycast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and city selection
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cli::init_tracing(cmd.verbose);
    cmd.run().await
}
