//! NFT ownership for the Safe.
//!
//! # Data Flow
//! ```text
//! Erc721Collection (Oni Ronin)
//!     → balanceOf + tokenOfOwnerByIndex (enumerate)
//!     → tokenURI → metadata.rs (gateway fetch, JSON parse)
//! PuftCollection (Ghostbusters Puft)
//!     → tokensOfOwner (IDs only)
//! ```

pub mod collections;
pub mod metadata;
pub mod types;

pub use collections::{Erc721Collection, PuftCollection, UnconfiguredCollection};
pub use metadata::MetadataFetcher;
pub use types::{NftError, NftResult, OwnedTokens, ResolvableCollection, ResolvedToken, TokenMetadata};
