//! Chain-specific types and error definitions.

use thiserror::Error;

pub use crate::config::schema::NodeConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Transport failure or an error returned by the node.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The node did not answer within the configured timeout.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node has no such entity.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Private key could not be parsed. Never carries key material.
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Building or signing the transaction failed.
    #[error("Signing error: {0}")]
    Signing(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.rpc_url, "http://localhost:7545");
        assert_eq!(config.rpc_timeout_secs, 10);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::InvalidAddress("0xzz".into());
        assert!(err.to_string().contains("0xzz"));
    }
}
