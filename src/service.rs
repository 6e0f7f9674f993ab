//! The capability boundary between transport and chain adapter.

use alloy::primitives::{TxHash, U256};
use async_trait::async_trait;
use std::sync::Arc;

use crate::blockchain::BlockchainResult;
use crate::models::{Block, Transaction};

/// Operations the HTTP layer needs from a chain.
#[async_trait]
pub trait BlockchainService: Send + Sync {
    /// The most recent block with all its transactions.
    async fn get_latest_block(&self) -> BlockchainResult<Block>;

    /// `Ok(None)` when the node knows no transaction with this hash.
    async fn get_transaction_by_hash(&self, hash: TxHash) -> BlockchainResult<Option<Transaction>>;

    /// Balance at the latest block, in wei, as a decimal string.
    async fn get_address_balance(&self, address: &str) -> BlockchainResult<String>;

    /// Sign and broadcast a native transfer. Not idempotent.
    async fn transfer_ethereum(
        &self,
        private_key: &str,
        to: &str,
        amount: U256,
    ) -> BlockchainResult<TxHash>;
}

/// Handle shared by all request handlers.
pub type SharedService = Arc<dyn BlockchainService>;
