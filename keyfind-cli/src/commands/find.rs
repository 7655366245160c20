//! Key search command.

use clap::Args;
use colored::Colorize;
use keyfind_hd::{Error, NetworkProfile, SearchResult, Searcher};
use serde::Serialize;

use crate::config::NetworkArgs;

const NOT_FOUND_MESSAGE: &str = "Address not found in common derivation paths";

/// Search a mnemonic's common derivation paths for an address.
#[derive(Args)]
pub struct FindCommand {
    /// BIP39 mnemonic phrase.
    #[arg(short, long)]
    mnemonic: String,

    /// Address whose private key to recover.
    #[arg(short, long)]
    address: String,

    /// BIP39 passphrase (if used when creating).
    #[arg(short, long)]
    passphrase: Option<String>,

    #[command(flatten)]
    network: NetworkArgs,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

/// Response body for a search, shaped for HTTP and script consumers.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum FindResponse<'a> {
    #[serde(rename_all = "camelCase")]
    Found {
        found: bool,
        private_key: &'a str,
        path: String,
        #[serde(rename = "type")]
        address_type: &'static str,
        address: &'a str,
    },
    NotFound {
        found: bool,
        message: &'static str,
    },
}

impl<'a> From<&'a SearchResult> for FindResponse<'a> {
    fn from(result: &'a SearchResult) -> Self {
        match result {
            SearchResult::Found(key) => Self::Found {
                found: true,
                private_key: key.private_key_wif.as_str(),
                path: key.path.to_string(),
                address_type: key.address_type.id(),
                address: &key.address,
            },
            SearchResult::NotFound => Self::NotFound {
                found: false,
                message: NOT_FOUND_MESSAGE,
            },
        }
    }
}

/// Error body. `details` never carries key material.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        match err {
            Error::Mnemonic(_) => Self {
                error: "Invalid mnemonic phrase",
                details: None,
            },
            Error::InvalidAddress(_) | Error::UnsupportedAddressType(_) => Self {
                error: "Invalid address",
                details: Some(err.to_string()),
            },
            _ => Self {
                error: "Internal error",
                details: Some(err.to_string()),
            },
        }
    }
}

impl FindCommand {
    /// Execute the find command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let profile = self.network.profile()?;
        let searcher = Searcher::new(&profile)?;
        tracing::debug!(network = %profile.name, "searching common derivation paths");

        let result = searcher.find(&self.mnemonic, self.passphrase.as_deref(), &self.address);
        match (result, self.json) {
            (Ok(result), true) => {
                println!("{}", serde_json::to_string_pretty(&FindResponse::from(&result))?);
            }
            (Ok(result), false) => print_result(&profile, &result),
            (Err(e), true) => {
                println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(&e))?);
                return Err(e.into());
            }
            (Err(e), false) => return Err(e.into()),
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_result(profile: &NetworkProfile, result: &SearchResult) {
    println!();
    println!("      {}      {}", "Network".cyan().bold(), profile.name);
    match result {
        SearchResult::Found(key) => {
            println!("      {} {}", "Address Type".cyan().bold(), key.address_type.name());
            println!("      {}         {}", "Path".cyan().bold(), key.path);
            println!("      {}      {}", "Address".cyan().bold(), key.address.green());
            println!("      {}  {}", "Private Key".cyan().bold(), key.private_key_wif.as_str());
        }
        SearchResult::NotFound => {
            println!("      {}", NOT_FOUND_MESSAGE.yellow());
        }
    }
    println!();
}
