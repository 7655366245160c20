//! Candidate path listing command.

use clap::Args;
use colored::Colorize;
use keyfind_hd::{NetworkProfile, Searcher};

/// List the candidate paths in search order.
#[derive(Args)]
pub struct PathsCommand {
    /// Only list the templates.
    #[arg(short, long)]
    templates: bool,
}

impl PathsCommand {
    /// Execute the paths command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        // Paths do not depend on the network.
        let profile = NetworkProfile::default();
        let searcher = Searcher::new(&profile)?;

        println!();
        if self.templates {
            for template in searcher.templates() {
                println!("      {}  {}", template.name().cyan().bold(), template.chain_path());
            }
        } else {
            for (i, path) in searcher.candidate_paths().enumerate() {
                println!("      {}  {path}", format!("[{i:>3}]").dimmed());
            }
        }
        println!();
        Ok(())
    }
}
