//! Network profile selection.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use keyfind_hd::{Network, NetworkProfile};

/// Flags that pick the network profile.
#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// Built-in network profile.
    #[arg(short, long, value_enum, default_value = "junkcoin")]
    network: CliNetwork,

    /// Load the network profile from a TOML file instead.
    #[arg(long, value_name = "PATH", conflicts_with = "network")]
    network_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliNetwork {
    /// Junkcoin mainnet (addresses start with 7)
    Junkcoin,
    /// Bitcoin mainnet (addresses start with 1)
    Bitcoin,
}

impl From<CliNetwork> for Network {
    fn from(val: CliNetwork) -> Self {
        match val {
            CliNetwork::Junkcoin => Self::Junkcoin,
            CliNetwork::Bitcoin => Self::Bitcoin,
        }
    }
}

impl NetworkArgs {
    /// Resolve the selected profile.
    pub fn profile(&self) -> Result<NetworkProfile, ConfigError> {
        match &self.network_file {
            Some(path) => load_profile(path),
            None => Ok(Network::from(self.network).profile()),
        }
    }
}

/// Errors from loading a profile file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a valid profile.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read network file {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid network file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

fn load_profile(path: &Path) -> Result<NetworkProfile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profile(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_profile(text: &str) -> Result<NetworkProfile, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LITECOIN_TOML: &str = r#"
        name = "litecoin"
        messagePrefix = "Litecoin Signed Message:\n"
        bech32 = "ltc"
        pubKeyHash = 0x30
        scriptHash = 0x32
        wif = 0xb0

        [bip32]
        public = 0x019da462
        private = 0x019d9cfe
    "#;

    #[test]
    fn test_builtin_profiles() {
        let args = NetworkArgs {
            network: CliNetwork::Junkcoin,
            network_file: None,
        };
        assert_eq!(args.profile().unwrap(), Network::Junkcoin.profile());

        let args = NetworkArgs {
            network: CliNetwork::Bitcoin,
            network_file: None,
        };
        assert_eq!(args.profile().unwrap().pub_key_hash, 0x00);
    }

    #[test]
    fn test_parse_custom_profile() {
        let profile = parse_profile(LITECOIN_TOML).unwrap();
        assert_eq!(profile.name, "litecoin");
        assert_eq!(profile.message_prefix, "Litecoin Signed Message:\n");
        assert_eq!(profile.pub_key_hash, 0x30);
        assert_eq!(profile.wif, 0xb0);
        assert_eq!(profile.bip32.public, 0x019d_a462);
    }

    #[test]
    fn test_parse_rejects_incomplete_profile() {
        assert!(parse_profile("name = \"junkcoin\"\nwif = 144\n").is_err());
        assert!(parse_profile("pubKeyHash = 300").is_err());
    }

    #[test]
    fn test_missing_file() {
        let args = NetworkArgs {
            network: CliNetwork::Junkcoin,
            network_file: Some(PathBuf::from("/nonexistent/keyfind-profile.toml")),
        };
        let err = args.profile().unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("keyfind-profile.toml"));
    }
}
