//! Private-key handling for a single transfer.
//!
//! # Security
//! - Keys arrive per request and live only for the duration of one transfer
//! - `sign` consumes the key, so it is dropped as soon as the signature exists
//! - Keys are never logged or serialized

use alloy::consensus::TxEnvelope;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use std::fmt;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// A parsed sender key.
pub struct TransferKey {
    signer: PrivateKeySigner,
}

impl TransferKey {
    /// Parse a hex-encoded private key (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);
        if key_hex.is_empty() {
            return Err(BlockchainError::InvalidPrivateKey("key is empty".to_string()));
        }

        // Parser errors can quote input characters, so they are not forwarded.
        let signer: PrivateKeySigner = key_hex.parse().map_err(|_| {
            BlockchainError::InvalidPrivateKey("expected 32 bytes of hex".to_string())
        })?;

        Ok(Self { signer })
    }

    /// Address derived from the key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a fully populated request, consuming the key.
    pub async fn sign(self, tx: TransactionRequest) -> BlockchainResult<TxEnvelope> {
        let wallet = EthereumWallet::from(self.signer);
        tx.build(&wallet)
            .await
            .map_err(|e| BlockchainError::Signing(e.to_string()))
    }
}

impl fmt::Debug for TransferKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
