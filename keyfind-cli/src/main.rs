//! Keyfind - recover the private key behind a known address from its mnemonic.
//!
//! Re-derives the keys of a BIP-39 mnemonic along a fixed set of common
//! derivation paths and reports the one whose P2PKH address matches.

mod commands;
mod config;

use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Find(cmd) => cmd.execute()?,
        Commands::Network(cmd) => cmd.execute()?,
        Commands::Paths(cmd) => cmd.execute()?,
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
