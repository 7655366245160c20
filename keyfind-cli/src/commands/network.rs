//! Network profile command.

use clap::Args;
use colored::Colorize;
use keyfind_hd::NetworkProfile;

use crate::config::NetworkArgs;

/// Show the active network profile.
#[derive(Args)]
pub struct NetworkCommand {
    #[command(flatten)]
    network: NetworkArgs,

    /// Print the profile as JSON.
    #[arg(long)]
    json: bool,
}

impl NetworkCommand {
    /// Execute the network command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let profile = self.network.profile()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        } else {
            print_profile(&profile);
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_profile(profile: &NetworkProfile) {
    println!();
    println!("      {}            {}", "Name".cyan().bold(), profile.name);
    println!("      {}  {:?}", "Message Prefix".cyan().bold(), profile.message_prefix);
    println!("      {}          {}", "Bech32".cyan().bold(), profile.bech32);
    println!("      {}            0x{:08x}", "Xpub".cyan().bold(), profile.bip32.public);
    println!("      {}            0x{:08x}", "Xprv".cyan().bold(), profile.bip32.private);
    println!("      {}     {}", "Pubkey Hash".cyan().bold(), profile.pub_key_hash);
    println!("      {}     {}", "Script Hash".cyan().bold(), profile.script_hash);
    println!("      {}             {}", "WIF".cyan().bold(), profile.wif);
    println!();
}
