//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoaderConfig (validated, immutable)
//!     → handed to the provider bundle and the load workflow
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid mainnet config
//! - Validation separates syntactic (serde) from semantic checks
//! - Addresses stay as strings here; they are parsed where they are used

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BlockchainConfig;
pub use schema::GnosisConfig;
pub use schema::LoaderConfig;
pub use schema::ObservabilityConfig;
