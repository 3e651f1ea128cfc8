//! On-chain NFT collections held by the Safe.

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use alloy::sol;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt, TryStreamExt};

use crate::blockchain::client::BlockchainClient;
use crate::nft::metadata::MetadataFetcher;
use crate::nft::types::{
    token_id_to_u64, NftResult, OwnedTokens, ResolvedToken, TokenMetadata,
    MAX_CONCURRENT_TOKEN_REQUESTS,
};

sol! {
    #[sol(rpc)]
    interface IERC721Enumerable {
        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
        function tokenURI(uint256 tokenId) external view returns (string memory);
    }

    #[sol(rpc)]
    interface IGhostbustersPuft {
        function tokensOfOwner(address owner) external view returns (uint256[] memory);
    }
}

/// ERC-721 Enumerable collection with metadata resolution (Oni Ronin).
#[derive(Clone)]
pub struct Erc721Collection {
    client: BlockchainClient,
    contract: IERC721Enumerable::IERC721EnumerableInstance<DynProvider>,
    metadata: MetadataFetcher,
}

impl Erc721Collection {
    pub fn new(client: BlockchainClient, address: Address, metadata: MetadataFetcher) -> Self {
        Self {
            contract: IERC721Enumerable::new(address, client.provider().clone()),
            client,
            metadata,
        }
    }

    async fn token_of_owner_by_index(&self, owner: Address, index: u64) -> NftResult<u64> {
        let id = self
            .client
            .contract_call(
                "tokenOfOwnerByIndex",
                self.contract
                    .tokenOfOwnerByIndex(owner, U256::from(index))
                    .call(),
            )
            .await?;
        token_id_to_u64(id)
    }
}

#[async_trait]
impl OwnedTokens for Erc721Collection {
    async fn token_ids_owned_by(&self, owner: Address) -> NftResult<Vec<u64>> {
        let balance = self
            .client
            .contract_call("balanceOf", self.contract.balanceOf(owner).call())
            .await?;
        let balance = token_id_to_u64(balance)?;

        stream::iter(0..balance)
            .map(|index| self.token_of_owner_by_index(owner, index))
            .buffered(MAX_CONCURRENT_TOKEN_REQUESTS)
            .try_collect::<Vec<_>>()
            .await
    }
}

#[async_trait]
impl TokenMetadata for Erc721Collection {
    async fn fully_resolve_uri(&self, token_id: u64) -> NftResult<ResolvedToken> {
        let uri = self
            .client
            .contract_call("tokenURI", self.contract.tokenURI(U256::from(token_id)).call())
            .await?;
        let metadata = self.metadata.fetch(&uri).await?;

        Ok(ResolvedToken {
            token_id,
            uri,
            metadata,
        })
    }
}

/// Ghostbusters Puft collection; only token IDs are read.
#[derive(Clone)]
pub struct PuftCollection {
    client: BlockchainClient,
    contract: IGhostbustersPuft::IGhostbustersPuftInstance<DynProvider>,
}

impl PuftCollection {
    pub fn new(client: BlockchainClient, address: Address) -> Self {
        Self {
            contract: IGhostbustersPuft::new(address, client.provider().clone()),
            client,
        }
    }
}

#[async_trait]
impl OwnedTokens for PuftCollection {
    async fn token_ids_owned_by(&self, owner: Address) -> NftResult<Vec<u64>> {
        let ids = self
            .client
            .contract_call("tokensOfOwner", self.contract.tokensOfOwner(owner).call())
            .await?;
        ids.into_iter().map(token_id_to_u64).collect()
    }
}

/// Stand-in for a collection with no address configured; holds nothing.
#[derive(Debug, Clone, Copy)]
pub struct UnconfiguredCollection(pub &'static str);

#[async_trait]
impl OwnedTokens for UnconfiguredCollection {
    async fn token_ids_owned_by(&self, _owner: Address) -> NftResult<Vec<u64>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl TokenMetadata for UnconfiguredCollection {
    async fn fully_resolve_uri(&self, _token_id: u64) -> NftResult<ResolvedToken> {
        Err(crate::nft::types::NftError::NotConfigured(self.0))
    }
}
