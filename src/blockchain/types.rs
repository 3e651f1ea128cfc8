//! Chain-specific types and error definitions.

use alloy::primitives::Address;
use thiserror::Error;

pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed. Carries the transport's own message.
    #[error("{0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Contract call reverted or returned undecodable data.
    #[error("Contract call {call} failed: {reason}")]
    Contract { call: &'static str, reason: String },

    /// No contract code at the configured Safe address.
    #[error("No Safe deployed at {0}")]
    SafeNotDeployed(Address),

    /// Malformed address string.
    #[error("Invalid address '{0}': expected 0x followed by 40 hex characters")]
    InvalidAddress(String),

    /// On-chain value does not fit the target type.
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Invalid private key format.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Whether `value` is `0x` followed by exactly 40 hex digits.
pub fn is_well_formed_address(value: &str) -> bool {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Parse an address after checking its textual shape.
///
/// Checksum casing is not enforced.
pub fn parse_address(value: &str) -> BlockchainResult<Address> {
    if !is_well_formed_address(value) {
        return Err(BlockchainError::InvalidAddress(value.to_string()));
    }
    value
        .parse()
        .map_err(|_| BlockchainError::InvalidAddress(value.to_string()))
}
