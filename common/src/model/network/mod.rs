//! Network identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Network the bond depository is deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// Ethereum mainnet
    Mainnet,
    /// Goerli testnet
    Testnet,
}

impl NetworkId {
    /// Every supported network
    pub const ALL: [NetworkId; 2] = [NetworkId::Mainnet, NetworkId::Testnet];

    /// EVM chain id
    pub fn chain_id(self) -> u64 {
        match self {
            NetworkId::Mainnet => 1,
            NetworkId::Testnet => 5,
        }
    }

    /// Lowercase name used in URLs and logs
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkId::Mainnet => "mainnet",
            NetworkId::Testnet => "testnet",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = Error;

    /// Accepts the network name or its chain id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "1" => Ok(NetworkId::Mainnet),
            "testnet" | "5" => Ok(NetworkId::Testnet),
            other => Err(Error::ValidationError(format!("Unsupported network: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_network() {
        assert_eq!("mainnet".parse::<NetworkId>().unwrap(), NetworkId::Mainnet);
        assert_eq!("TESTNET".parse::<NetworkId>().unwrap(), NetworkId::Testnet);
        assert_eq!("5".parse::<NetworkId>().unwrap(), NetworkId::Testnet);
        assert!("arbitrum".parse::<NetworkId>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&NetworkId::Mainnet).unwrap();
        assert_eq!(json, "\"mainnet\"");
    }
}
