//! CLI command definitions and handlers.

mod find;
mod network;
mod paths;

use clap::{Parser, Subcommand};
pub use find::FindCommand;
pub use network::NetworkCommand;
pub use paths::PathsCommand;

/// Keyfind - recover the private key behind a known address from its mnemonic.
#[derive(Parser)]
#[command(name = "keyfind")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log every candidate tried (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search a mnemonic's common derivation paths for an address.
    #[command(alias = "search")]
    Find(FindCommand),

    /// Show the active network profile.
    Network(NetworkCommand),

    /// List the candidate paths in search order.
    Paths(PathsCommand),
}
