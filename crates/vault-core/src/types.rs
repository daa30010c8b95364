//! Core type definitions for the exchange vault client

use serde::{Deserialize, Serialize};
use std::fmt;

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Localnet => "localnet",
        }
    }

    /// Public fullnode JSON-RPC endpoint for this network
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Self::Testnet => "https://fullnode.testnet.sui.io:443",
            Self::Devnet => "https://fullnode.devnet.sui.io:443",
            Self::Localnet => "http://127.0.0.1:9000",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            "localnet" => Ok(Self::Localnet),
            other => Err(format!("Unknown network: {}", other)),
        }
    }
}

/// Constants
pub mod constants {
    /// Largest value representable by an on-chain `u64`
    pub const MAX_U64: u64 = u64::MAX;

    /// Largest supported rate decimal exponent
    pub const MAX_RATE_DECIMALS: u8 = 18;

    /// Move standard library package
    pub const MOVE_STDLIB_ADDRESS: &str = "0x1";

    /// Sui framework package
    pub const SUI_FRAMEWORK_ADDRESS: &str = "0x2";

    /// Native gas coin type, short form
    pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

    /// Native gas coin type, with the address fully padded
    pub const SUI_COIN_TYPE_LONG: &str =
        "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI";

    /// Decimals of the native gas coin
    pub const SUI_DECIMALS: u8 = 9;
}
