//! Read access to a single, fixed Safe.
//!
//! # Responsibilities
//! - Build the signer-backed adapter once per client, on first use
//! - Resolve a fresh Safe handle for every read
//! - Propagate every RPC or contract failure to the caller, without retries

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::BlockchainResult;
use crate::blockchain::wallet::Wallet;
use crate::safe::contract::SafeHandle;

/// Reads the state of one Safe.
#[async_trait]
pub trait SafeReader: Send + Sync {
    /// Native-currency balance, in wei.
    async fn get_balance(&self) -> BlockchainResult<U256>;
    /// Owner addresses in contract order.
    async fn get_owners(&self) -> BlockchainResult<Vec<Address>>;
    /// Enabled modules.
    async fn get_modules(&self) -> BlockchainResult<Vec<Address>>;
    async fn is_owner(&self, address: Address) -> BlockchainResult<bool>;
    /// Number of signatures required.
    async fn get_threshold(&self) -> BlockchainResult<u64>;
}

/// Provider plus the account that would sign for the Safe.
#[derive(Debug)]
pub struct SafeAdapter {
    client: BlockchainClient,
    signer: Option<Address>,
}

impl SafeAdapter {
    /// Pick a signer: the local wallet if any, else the node's first account.
    ///
    /// A node with no accounts, or one rejecting `eth_accounts`, yields a
    /// read-only adapter. Reads never need the signer.
    pub async fn connect(client: BlockchainClient, wallet: Option<&Wallet>) -> Self {
        let signer = match wallet {
            Some(wallet) => Some(wallet.address()),
            None => match client.get_accounts().await {
                Ok(accounts) => accounts.into_iter().next(),
                Err(e) => {
                    tracing::warn!(error = %e, "Node accounts unavailable, using read-only adapter");
                    None
                }
            },
        };

        match signer {
            Some(signer) => tracing::debug!(%signer, "Safe adapter created"),
            None => tracing::debug!("Safe adapter created without signer"),
        }

        Self { client, signer }
    }

    /// Account that would sign Safe transactions.
    pub fn signer(&self) -> Option<Address> {
        self.signer
    }

    /// Resolve the Safe deployed at `address`.
    pub async fn safe(&self, address: Address) -> BlockchainResult<SafeHandle> {
        SafeHandle::resolve(&self.client, address).await
    }
}

/// Client for the Safe at `safe_address`.
#[derive(Debug)]
pub struct SafeClient {
    client: BlockchainClient,
    safe_address: Address,
    wallet: Option<Wallet>,
    adapter: OnceCell<SafeAdapter>,
}

impl SafeClient {
    pub fn new(client: BlockchainClient, safe_address: Address, wallet: Option<Wallet>) -> Self {
        Self {
            client,
            safe_address,
            wallet,
            adapter: OnceCell::new(),
        }
    }

    pub fn safe_address(&self) -> Address {
        self.safe_address
    }

    /// The cached adapter, created on first call.
    pub async fn adapter(&self) -> &SafeAdapter {
        self.adapter
            .get_or_init(|| SafeAdapter::connect(self.client.clone(), self.wallet.as_ref()))
            .await
    }

    async fn safe(&self) -> BlockchainResult<SafeHandle> {
        self.adapter().await.safe(self.safe_address).await
    }

    /// Safe contract version string.
    pub async fn get_version(&self) -> BlockchainResult<String> {
        self.safe().await?.get_version().await
    }
}

#[async_trait]
impl SafeReader for SafeClient {
    async fn get_balance(&self) -> BlockchainResult<U256> {
        self.safe().await?.get_balance().await
    }

    async fn get_owners(&self) -> BlockchainResult<Vec<Address>> {
        self.safe().await?.get_owners().await
    }

    async fn get_modules(&self) -> BlockchainResult<Vec<Address>> {
        self.safe().await?.get_modules().await
    }

    async fn is_owner(&self, address: Address) -> BlockchainResult<bool> {
        self.safe().await?.is_owner(address).await
    }

    async fn get_threshold(&self) -> BlockchainResult<u64> {
        self.safe().await?.get_threshold().await
    }
}
