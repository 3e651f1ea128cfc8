//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint
//! - Query chain state (chain id, balances, code, node accounts)
//! - Bound every request, contract calls included, by the configured timeout

use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};

/// Blockchain RPC client wrapper.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Type-erased HTTP provider.
    provider: DynProvider,
    /// Configuration.
    config: BlockchainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// No request is sent; an unreachable node only shows up on the first call.
    pub fn new(config: BlockchainConfig) -> BlockchainResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        Ok(Self {
            provider,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        })
    }

    /// Await an RPC request, mapping transport errors and timeouts.
    ///
    /// `op` names the request in logs and error messages.
    pub async fn request<F, T, E>(&self, op: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(op, error = %e, "RPC error");
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(op, "RPC timeout");
                Err(BlockchainError::Timeout(self.config.rpc_timeout_secs))
            }
        }
    }

    /// Await a contract call, mapping reverts and decode failures.
    pub async fn contract_call<F, T, E>(&self, call: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(call, error = %e, "Contract call failed");
                Err(BlockchainError::Contract {
                    call,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                tracing::warn!(call, "Contract call timeout");
                Err(BlockchainError::Timeout(self.config.rpc_timeout_secs))
            }
        }
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.request("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Get the native balance of an address, in wei.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.request("eth_getBalance", self.provider.get_balance(address))
            .await
    }

    /// Get the deployed bytecode at an address.
    pub async fn get_code(&self, address: Address) -> BlockchainResult<Bytes> {
        self.request("eth_getCode", self.provider.get_code_at(address))
            .await
    }

    /// Accounts the node can sign for.
    pub async fn get_accounts(&self) -> BlockchainResult<Vec<Address>> {
        self.request("eth_accounts", self.provider.get_accounts())
            .await
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BlockchainConfig {
        BlockchainConfig {
            // Nothing listens on port 1, so requests fail fast.
            rpc_url: "http://127.0.0.1:1".to_string(),
            chain_id: 31337,
            rpc_timeout_secs: 2,
        }
    }

    #[test]
    fn test_client_creation_is_offline() {
        let client = BlockchainClient::new(test_config()).unwrap();
        assert_eq!(client.config().chain_id, 31337);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let err = BlockchainClient::new(config).unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_unreachable_node() {
        let client = BlockchainClient::new(test_config()).unwrap();
        let result = client.get_chain_id().await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout() {
        let client = BlockchainClient::new(test_config()).unwrap();
        let never = std::future::pending::<Result<u64, BlockchainError>>();

        let err = client.request("never", never).await.unwrap_err();
        assert!(matches!(err, BlockchainError::Timeout(2)));
    }

    #[tokio::test]
    async fn test_contract_error_mapping() {
        let client = BlockchainClient::new(test_config()).unwrap();
        let failing = async { Err::<u64, _>("execution reverted") };
        let err = client.contract_call("getThreshold", failing).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Contract call getThreshold failed: execution reverted"
        );
    }
}
