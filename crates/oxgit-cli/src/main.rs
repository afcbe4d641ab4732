//! oxgit
//!
//! A small git-compatible object database: `init`, `hash-object` and
//! `cat-file` over loose objects.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries object ids and content.
    let default_filter = if cli.verbose { "oxgit=debug" } else { "oxgit=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    commands::run_command(cli)
}
