//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Address of the Safe whose state is loaded.
pub const GNOSIS_SAFE_ADDRESS: &str = "0x1715f37113C56d7361b1191AEE2B45DA020a85E9";

/// Root configuration for the loader.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoaderConfig {
    /// RPC connection settings.
    pub blockchain: BlockchainConfig,

    /// Safe and NFT contract addresses.
    pub gnosis: GnosisConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Blockchain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Expected chain ID (1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 1,
            rpc_timeout_secs: 10,
        }
    }
}

/// Fixed contract addresses the workflow reads from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GnosisConfig {
    /// The Safe multisig.
    pub safe_address: String,

    /// Oni Ronin ERC-721 (enumerable) collection. Empty leaves the collection unset.
    pub oni_ronin_address: String,

    /// Ghostbusters Puft collection. Empty leaves the collection unset.
    pub puft_address: String,

    /// HTTP gateway used to fetch `ipfs://` token metadata.
    pub ipfs_gateway: String,
}

impl Default for GnosisConfig {
    fn default() -> Self {
        Self {
            safe_address: GNOSIS_SAFE_ADDRESS.to_string(),
            oni_ronin_address: String::new(),
            puft_address: String::new(),
            ipfs_gateway: "https://ipfs.io/ipfs/".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
