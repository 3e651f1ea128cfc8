//! ENS reverse name resolution.
//!
//! A reverse record is only trusted when the name resolves forward to the
//! same address.

use alloy::primitives::{address, keccak256, Address, B256};
use alloy::sol;
use async_trait::async_trait;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::BlockchainResult;

/// ENS registry, same address on mainnet and the public testnets.
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

sol! {
    #[sol(rpc)]
    interface IEnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    #[sol(rpc)]
    interface IEnsResolver {
        function name(bytes32 node) external view returns (string memory);
        function addr(bytes32 node) external view returns (address);
    }
}

/// Looks up a display name for an address.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// `Ok(None)` when the address has no verified name.
    async fn lookup_address(&self, address: Address) -> BlockchainResult<Option<String>>;
}

/// EIP-137 namehash.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(buf);
    }
    node
}

/// Node of `<lowercase hex address>.addr.reverse`.
pub fn reverse_node(address: Address) -> B256 {
    namehash(&format!("{}.addr.reverse", alloy::hex::encode(address.as_slice())))
}

/// Resolver backed by the on-chain ENS registry.
#[derive(Debug, Clone)]
pub struct EnsNameResolver {
    client: BlockchainClient,
    registry: Address,
}

impl EnsNameResolver {
    /// Use the canonical registry.
    pub fn new(client: BlockchainClient) -> Self {
        Self::with_registry(client, ENS_REGISTRY)
    }

    /// Use a custom registry (local devnets).
    pub fn with_registry(client: BlockchainClient, registry: Address) -> Self {
        Self { client, registry }
    }

    async fn resolver_for(&self, node: B256) -> BlockchainResult<Option<Address>> {
        let registry = IEnsRegistry::new(self.registry, self.client.provider().clone());
        let resolver = self
            .client
            .contract_call("resolver", registry.resolver(node).call())
            .await?;
        Ok((resolver != Address::ZERO).then_some(resolver))
    }
}

#[async_trait]
impl NameResolver for EnsNameResolver {
    async fn lookup_address(&self, address: Address) -> BlockchainResult<Option<String>> {
        let node = reverse_node(address);
        let Some(resolver) = self.resolver_for(node).await? else {
            return Ok(None);
        };

        let reverse = IEnsResolver::new(resolver, self.client.provider().clone());
        let name = self
            .client
            .contract_call("name", reverse.name(node).call())
            .await?;
        if name.is_empty() {
            return Ok(None);
        }

        let forward_node = namehash(&name);
        let Some(forward_resolver) = self.resolver_for(forward_node).await? else {
            return Ok(None);
        };
        let forward = IEnsResolver::new(forward_resolver, self.client.provider().clone());
        let resolved = self
            .client
            .contract_call("addr", forward.addr(forward_node).call())
            .await?;

        if resolved == address {
            Ok(Some(name))
        } else {
            tracing::debug!(%address, name = %name, "Reverse record does not resolve back, ignoring");
            Ok(None)
        }
    }
}
