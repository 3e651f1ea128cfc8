//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! BlockchainConfig (RPC URL, chain id, timeout)
//!     → client.rs (RPC connection with timeouts)
//!     → provider.rs (ProviderBundle: connected or failure reason)
//!     → ens.rs (reverse name lookups)
//! Environment (optional private key)
//!     → wallet.rs (signer for the Safe adapter)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod ens;
pub mod provider;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use ens::{EnsNameResolver, NameResolver};
pub use provider::ProviderBundle;
pub use types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
pub use wallet::Wallet;
