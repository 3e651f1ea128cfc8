//! Provider bundle handed to the load workflow.

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::BlockchainConfig;

/// A connected provider, or the reason none is available.
#[derive(Debug, Clone)]
pub enum ProviderBundle<P = BlockchainClient> {
    /// Provider is connected to the expected chain.
    Connected(P),
    /// No usable provider.
    Failure { reason: String },
}

impl<P> ProviderBundle<P> {
    /// Build a failure bundle.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Whether this bundle carries a provider.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Transform the connected provider, keeping failures as-is.
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> ProviderBundle<Q> {
        match self {
            Self::Connected(provider) => ProviderBundle::Connected(f(provider)),
            Self::Failure { reason } => ProviderBundle::Failure { reason },
        }
    }
}

impl ProviderBundle<BlockchainClient> {
    /// Connect to the configured RPC endpoint and check the chain ID.
    ///
    /// Never fails; problems are reported through [`ProviderBundle::Failure`].
    pub async fn connect(config: &BlockchainConfig) -> Self {
        let client = match BlockchainClient::new(config.clone()) {
            Ok(client) => client,
            Err(e) => return Self::failure(e.to_string()),
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Provider connected"
                );
                Self::Connected(client)
            }
            Err(e) => {
                tracing::warn!(error = %e, rpc_url = %config.rpc_url, "Provider unavailable");
                Self::failure(e.to_string())
            }
        }
    }
}
