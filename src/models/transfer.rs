//! Transfer request/response bodies.
//!
//! # Security
//! - `TransferRequest` carries a raw private key
//! - Its `Debug` output redacts the key so it cannot leak through logs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /api/v1/eth/transfer`.
#[derive(Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Hex-encoded sender private key, `0x` prefix optional.
    #[serde(rename = "privKey")]
    pub priv_key: String,
    pub to: String,
    /// Amount in wei.
    pub amount: u128,
}

impl fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferRequest")
            .field("priv_key", &"<redacted>")
            .field("to", &self.to)
            .field("amount", &self.amount)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashResponse {
    pub hash: String,
}
