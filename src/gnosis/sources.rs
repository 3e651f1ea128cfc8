//! Collaborators a load reads from.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::ens::{EnsNameResolver, NameResolver};
use crate::blockchain::types::{parse_address, BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;
use crate::config::schema::GnosisConfig;
use crate::nft::collections::{Erc721Collection, PuftCollection, UnconfiguredCollection};
use crate::nft::metadata::MetadataFetcher;
use crate::nft::types::{OwnedTokens, ResolvableCollection};
use crate::safe::client::{SafeClient, SafeReader};

/// Everything the workflow needs for one load.
#[derive(Clone)]
pub struct GnosisSources {
    /// Address NFT ownership is queried for.
    pub safe_address: Address,
    pub safe: Arc<dyn SafeReader>,
    pub names: Arc<dyn NameResolver>,
    pub oni: Arc<dyn ResolvableCollection>,
    pub puft: Arc<dyn OwnedTokens>,
}

/// Payload of a connected provider bundle.
pub trait GnosisBackend: Send + Sync {
    /// Build the collaborators for one load.
    fn sources(&self) -> BlockchainResult<GnosisSources>;
}

impl GnosisBackend for GnosisSources {
    fn sources(&self) -> BlockchainResult<GnosisSources> {
        Ok(self.clone())
    }
}

/// Backend reading everything over JSON-RPC.
#[derive(Debug, Clone)]
pub struct RpcBackend {
    client: BlockchainClient,
    gnosis: GnosisConfig,
    wallet: Option<Wallet>,
}

impl RpcBackend {
    pub fn new(client: BlockchainClient, gnosis: GnosisConfig, wallet: Option<Wallet>) -> Self {
        Self {
            client,
            gnosis,
            wallet,
        }
    }

    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }

    /// A new client for the configured Safe.
    pub fn safe_client(&self) -> BlockchainResult<SafeClient> {
        let safe_address = parse_address(&self.gnosis.safe_address)?;
        Ok(SafeClient::new(
            self.client.clone(),
            safe_address,
            self.wallet.clone(),
        ))
    }

    fn oni_collection(&self) -> BlockchainResult<Arc<dyn ResolvableCollection>> {
        if self.gnosis.oni_ronin_address.is_empty() {
            return Ok(Arc::new(UnconfiguredCollection("oni-ronin")));
        }
        let address = parse_address(&self.gnosis.oni_ronin_address)?;
        let timeout = Duration::from_secs(self.client.config().rpc_timeout_secs);
        let metadata = MetadataFetcher::new(&self.gnosis.ipfs_gateway, timeout)
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;
        Ok(Arc::new(Erc721Collection::new(
            self.client.clone(),
            address,
            metadata,
        )))
    }

    fn puft_collection(&self) -> BlockchainResult<Arc<dyn OwnedTokens>> {
        if self.gnosis.puft_address.is_empty() {
            return Ok(Arc::new(UnconfiguredCollection("ghostbusters-puft")));
        }
        let address = parse_address(&self.gnosis.puft_address)?;
        Ok(Arc::new(PuftCollection::new(self.client.clone(), address)))
    }
}

impl GnosisBackend for RpcBackend {
    fn sources(&self) -> BlockchainResult<GnosisSources> {
        let safe = self.safe_client()?;
        Ok(GnosisSources {
            safe_address: safe.safe_address(),
            safe: Arc::new(safe),
            names: Arc::new(EnsNameResolver::new(self.client.clone())),
            oni: self.oni_collection()?,
            puft: self.puft_collection()?,
        })
    }
}
