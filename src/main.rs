// Copyright 2026 Verwatch Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};
use verwatch::cli;

#[derive(Parser)]
#[command(
    name = "verwatch",
    about = "Verwatch — tracks version identifiers embedded in client URLs",
    version,
    after_help = "Run 'verwatch' with no command to check all clients and export."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every client URL once and export the updated history
    Run,
    /// Check environment and diagnose issues
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "verwatch=debug" } else { "verwatch=info" };
    let filter = match default_level.parse() {
        Ok(directive) => {
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive)
        }
        Err(_) => tracing_subscriber::EnvFilter::new(default_level),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        // No subcommand → single-shot pipeline run
        None | Some(Commands::Run) => cli::run_cmd::run().await,
        Some(Commands::Doctor) => cli::doctor::run().await,
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    result
}
