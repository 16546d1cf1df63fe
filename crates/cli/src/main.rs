// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sigrec - Record every signal an object emits

mod commands;
mod output;
mod reply;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{catalog, request, script};

#[derive(Parser)]
#[command(
    name = "sigrec",
    version,
    about = "Signal recorder - log every signal an object emits, in order"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a network request and record the reply's signals
    Request(request::RequestArgs),
    /// List the signals an inspector would subscribe to on a reply
    Catalog(catalog::CatalogArgs),
    /// Run an emission scenario from a TOML file
    Script(script::ScriptArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Request(args) => request::run(args).await,
        Commands::Catalog(args) => catalog::run(args),
        Commands::Script(args) => script::run(args),
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // stdout is reserved for command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
