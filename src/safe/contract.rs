//! Safe contract bindings and the per-call handle.

use std::future::Future;

use alloy::primitives::{address, Address, U256};
use alloy::providers::DynProvider;
use alloy::sol;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};

sol! {
    #[sol(rpc)]
    interface ISafe {
        function VERSION() external view returns (string memory);
        function getOwners() external view returns (address[] memory);
        function getThreshold() external view returns (uint256);
        function isOwner(address owner) external view returns (bool);
        function getModulesPaginated(address start, uint256 pageSize)
            external
            view
            returns (address[] memory array, address next);
    }
}

/// Head of the Safe's module linked list.
pub const SENTINEL_MODULES: Address = address!("0000000000000000000000000000000000000001");

/// Modules requested per `getModulesPaginated` page.
pub const MODULES_PAGE_SIZE: u64 = 10;

/// Follow `getModulesPaginated` pages until the list is exhausted.
///
/// Each page continues from the last module returned, not from `next`: v1.3.0
/// reports the first module not yet returned as `next`, v1.4.1 the last one
/// returned, and starting after the last returned module is correct for both.
pub async fn collect_module_pages<F, Fut>(mut fetch_page: F) -> BlockchainResult<Vec<Address>>
where
    F: FnMut(Address) -> Fut,
    Fut: Future<Output = BlockchainResult<(Vec<Address>, Address)>>,
{
    let mut modules = Vec::new();
    let mut start = SENTINEL_MODULES;

    loop {
        let (array, next) = fetch_page(start).await?;
        let Some(&last) = array.last() else {
            break;
        };
        modules.extend(array);
        if next == SENTINEL_MODULES || next == Address::ZERO {
            break;
        }
        start = last;
    }

    Ok(modules)
}

/// A Safe resolved at a fixed address.
pub struct SafeHandle {
    client: BlockchainClient,
    contract: ISafe::ISafeInstance<DynProvider>,
}

impl SafeHandle {
    /// Bind to `address`, failing when no contract is deployed there.
    pub async fn resolve(client: &BlockchainClient, address: Address) -> BlockchainResult<Self> {
        let code = client.get_code(address).await?;
        if code.is_empty() {
            return Err(BlockchainError::SafeNotDeployed(address));
        }
        Ok(Self {
            contract: ISafe::new(address, client.provider().clone()),
            client: client.clone(),
        })
    }

    /// The Safe's address.
    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    /// Native balance held by the Safe, in wei.
    pub async fn get_balance(&self) -> BlockchainResult<U256> {
        self.client.get_balance(self.address()).await
    }

    pub async fn get_owners(&self) -> BlockchainResult<Vec<Address>> {
        self.client
            .contract_call("getOwners", self.contract.getOwners().call())
            .await
    }

    pub async fn get_threshold(&self) -> BlockchainResult<u64> {
        let threshold = self
            .client
            .contract_call("getThreshold", self.contract.getThreshold().call())
            .await?;
        u64::try_from(threshold)
            .map_err(|_| BlockchainError::OutOfRange(format!("threshold {}", threshold)))
    }

    pub async fn is_owner(&self, owner: Address) -> BlockchainResult<bool> {
        self.client
            .contract_call("isOwner", self.contract.isOwner(owner).call())
            .await
    }

    pub async fn get_version(&self) -> BlockchainResult<String> {
        self.client
            .contract_call("VERSION", self.contract.VERSION().call())
            .await
    }

    /// Walk the module list page by page from the sentinel.
    pub async fn get_modules(&self) -> BlockchainResult<Vec<Address>> {
        collect_module_pages(|start| async move {
            let page = self
                .client
                .contract_call(
                    "getModulesPaginated",
                    self.contract
                        .getModulesPaginated(start, U256::from(MODULES_PAGE_SIZE))
                        .call(),
                )
                .await?;
            Ok((page.array, page.next))
        })
        .await
    }
}
