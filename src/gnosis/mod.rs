//! Safe dashboard data: load workflow, states and store.
//!
//! # Data Flow
//! ```text
//! ProviderBundle<B: GnosisBackend>
//!     → sources.rs (SafeReader, NameResolver, NFT collections)
//!     → workflow.rs (sequential reads, isolated NFT step)
//!     → state.rs (GnosisLoadResult)
//!     → store.rs (GnosisStore sink)
//! ```

pub mod sources;
pub mod state;
pub mod store;
pub mod workflow;

pub use sources::{GnosisBackend, GnosisSources, RpcBackend};
pub use state::{GnosisData, GnosisLoadResult, OwnerInfo};
pub use store::{GnosisSlice, GnosisStore};
pub use workflow::load_gnosis_data;
