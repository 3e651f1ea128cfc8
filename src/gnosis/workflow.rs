//! Safe state load workflow.
//!
//! # Flow
//! ```text
//! ProviderBundle::Failure ───────────────────────────────▶ Error
//! ProviderBundle::Connected
//!     → Loading
//!     → balance → owners → names (fan-out) → threshold ──▶ Error on failure
//!     → NFTs: oni ∥ puft (each failure isolated, list left empty)
//!     → Loaded
//! ```
//!
//! Exactly one terminal state is published per call. Concurrent calls are not
//! serialized here.

use alloy::primitives::Address;
use futures_util::future::join_all;
use futures_util::stream::{self, StreamExt, TryStreamExt};

use crate::blockchain::ens::NameResolver;
use crate::blockchain::provider::ProviderBundle;
use crate::blockchain::types::BlockchainResult;
use crate::gnosis::sources::{GnosisBackend, GnosisSources};
use crate::gnosis::state::{GnosisData, GnosisLoadResult, OwnerInfo};
use crate::gnosis::store::GnosisStore;
use crate::nft::types::{
    NftResult, OwnedTokens, ResolvableCollection, ResolvedToken, MAX_CONCURRENT_TOKEN_REQUESTS,
};

/// Fallback when an error renders as nothing.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Load the Safe's state and publish each lifecycle step to `store`.
pub async fn load_gnosis_data<B: GnosisBackend>(bundle: ProviderBundle<B>, store: &dyn GnosisStore) {
    let backend = match bundle {
        ProviderBundle::Failure { reason } => {
            tracing::warn!(reason = %reason, "No provider, skipping Safe load");
            store.publish(GnosisLoadResult::Error { message: reason });
            return;
        }
        ProviderBundle::Connected(backend) => backend,
    };

    store.publish(GnosisLoadResult::Loading);

    let result = match backend.sources() {
        Ok(sources) => load(&sources).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(gnosis_data) => {
            tracing::info!(
                balance = %gnosis_data.balance,
                owners = gnosis_data.owners.len(),
                threshold = gnosis_data.threshold,
                oni_tokens = gnosis_data.oni_tokens.len(),
                puft_tokens = gnosis_data.puft_token_ids.len(),
                "Safe data loaded"
            );
            store.publish(GnosisLoadResult::Loaded { gnosis_data });
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load Safe data");
            store.publish(GnosisLoadResult::Error {
                message: error_message(&e),
            });
        }
    }
}

async fn load(sources: &GnosisSources) -> BlockchainResult<GnosisData> {
    let balance = sources.safe.get_balance().await?;
    let owner_addresses = sources.safe.get_owners().await?;
    let owners = resolve_owner_names(sources.names.as_ref(), owner_addresses).await;
    let threshold = sources.safe.get_threshold().await?;

    let (oni_tokens, puft_token_ids) = tokio::join!(
        fetch_oni_tokens(sources.oni.as_ref(), sources.safe_address),
        fetch_puft_token_ids(sources.puft.as_ref(), sources.safe_address),
    );

    Ok(GnosisData {
        balance: balance.to_string(),
        owners,
        threshold,
        oni_tokens,
        puft_token_ids,
    })
}

/// Reverse-resolve every owner concurrently; a failed lookup leaves the name empty.
pub async fn resolve_owner_names(names: &dyn NameResolver, addresses: Vec<Address>) -> Vec<OwnerInfo> {
    join_all(addresses.into_iter().map(|address| async move {
        let name = match names.lookup_address(address).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(%address, error = %e, "Owner name lookup failed");
                None
            }
        };
        OwnerInfo { address, name }
    }))
    .await
}

async fn fetch_oni_tokens(collection: &dyn ResolvableCollection, owner: Address) -> Vec<ResolvedToken> {
    let result: NftResult<Vec<ResolvedToken>> = async {
        let token_ids = collection.token_ids_owned_by(owner).await?;
        stream::iter(token_ids)
            .map(|id| collection.fully_resolve_uri(id))
            .buffered(MAX_CONCURRENT_TOKEN_REQUESTS)
            .try_collect::<Vec<_>>()
            .await
    }
    .await;

    result.unwrap_or_else(|e| {
        tracing::error!(collection = "oni-ronin", error = %e, "NFT fetch failed");
        Vec::new()
    })
}

async fn fetch_puft_token_ids(collection: &dyn OwnedTokens, owner: Address) -> Vec<u64> {
    collection
        .token_ids_owned_by(owner)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(collection = "ghostbusters-puft", error = %e, "NFT fetch failed");
            Vec::new()
        })
}

/// Message published for a failed load.
pub fn error_message(err: &dyn std::error::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}
