//! Block and transaction snapshots.

use serde::{Deserialize, Serialize};

/// A block as returned by `GET /api/v1/eth/block/latest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub block_number: u64,
    /// Seconds since the unix epoch.
    pub timestamp: u64,
    pub difficulty: u64,
    pub hash: String,
    pub transactions_count: usize,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Build a block whose count always matches its transaction list.
    pub fn new(
        block_number: u64,
        timestamp: u64,
        difficulty: u64,
        hash: String,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            block_number,
            timestamp,
            difficulty,
            hash,
            transactions_count: transactions.len(),
            transactions,
        }
    }
}

/// A transaction snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    /// Transferred value in wei, as a decimal string.
    pub value: String,
    /// Gas limit.
    pub gas: u64,
    pub gas_price: u128,
    pub nonce: u64,
    /// Recipient, `None` for contract creation.
    pub to: Option<String>,
    /// True while the transaction has not been included in a block.
    pub pending: bool,
}
