//! JSON-facing domain models.
//!
//! Every value here is built fresh per request from node data and dropped
//! once the response is serialized. Nothing is cached or persisted.

pub mod account;
pub mod chain;
pub mod transfer;

pub use account::BalanceResponse;
pub use chain::{Block, Transaction};
pub use transfer::{HashResponse, TransferRequest};

use serde::{Deserialize, Serialize};

/// Error envelope returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
