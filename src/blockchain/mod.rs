//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Service call
//!     → client.rs (RPC with timeouts, response mapping)
//!     → wallet.rs (per-request key parsing, signing)
//!     → transaction.rs (transfer construction)
//! ```
//!
//! # Security Constraints
//! - Private keys arrive per request and are dropped right after signing
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - No retries: node failures surface directly to the caller

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::EthereumClient;
pub use transaction::TRANSFER_GAS_LIMIT;
pub use types::{BlockchainError, BlockchainResult, ChainId};
