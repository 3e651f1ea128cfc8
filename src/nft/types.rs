//! NFT ownership types and error definitions.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::types::BlockchainError;

/// Errors raised while enumerating or resolving tokens.
#[derive(Debug, Error)]
pub enum NftError {
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    /// Metadata request failed.
    #[error("Metadata fetch failed for {uri}: {reason}")]
    Fetch { uri: String, reason: String },

    /// Metadata document is not JSON.
    #[error("Metadata for {uri} is not valid JSON: {reason}")]
    Metadata { uri: String, reason: String },

    /// Token URI scheme we cannot fetch.
    #[error("Unsupported token URI: {0}")]
    UnsupportedUri(String),

    /// Token ID does not fit in 64 bits.
    #[error("Token ID {0} out of range")]
    TokenIdOutOfRange(U256),

    /// Collection has no contract address configured.
    #[error("Collection {0} is not configured")]
    NotConfigured(&'static str),
}

/// Result type for NFT operations.
pub type NftResult<T> = Result<T, NftError>;

/// Per-token requests kept in flight at once.
pub const MAX_CONCURRENT_TOKEN_REQUESTS: usize = 8;

/// A token with its metadata document fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedToken {
    pub token_id: u64,
    /// URI as returned by `tokenURI`.
    pub uri: String,
    pub metadata: serde_json::Value,
}

/// Lists the tokens an address holds in one collection.
#[async_trait]
pub trait OwnedTokens: Send + Sync {
    async fn token_ids_owned_by(&self, owner: Address) -> NftResult<Vec<u64>>;
}

/// Resolves a token's URI into its metadata document.
#[async_trait]
pub trait TokenMetadata: Send + Sync {
    async fn fully_resolve_uri(&self, token_id: u64) -> NftResult<ResolvedToken>;
}

/// A collection supporting both enumeration and metadata resolution.
pub trait ResolvableCollection: OwnedTokens + TokenMetadata {}

impl<T: OwnedTokens + TokenMetadata> ResolvableCollection for T {}

pub(crate) fn token_id_to_u64(id: U256) -> NftResult<u64> {
    u64::try_from(id).map_err(|_| NftError::TokenIdOutOfRange(id))
}
