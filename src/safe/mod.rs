//! Safe multisig access.
//!
//! # Data Flow
//! ```text
//! SafeClient (fixed address)
//!     → SafeAdapter (lazy, one per client)
//!     → SafeHandle (resolved per call: code check + ISafe binding)
//!     → balance / owners / modules / isOwner / threshold
//! ```

pub mod client;
pub mod contract;

pub use client::{SafeAdapter, SafeClient, SafeReader};
pub use contract::SafeHandle;
