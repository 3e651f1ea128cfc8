//! Safe multisig dashboard loader.
//!
//! Reads balance, owners, threshold and modules of a fixed Safe, the NFTs it
//! holds in two collections, and publishes the result as a tagged load state.

pub mod blockchain;
pub mod config;
pub mod gnosis;
pub mod nft;
pub mod observability;
pub mod safe;

pub use blockchain::ProviderBundle;
pub use config::LoaderConfig;
pub use gnosis::{load_gnosis_data, GnosisLoadResult, GnosisStore};
