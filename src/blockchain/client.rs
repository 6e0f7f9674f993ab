//! Node RPC adapter.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoint
//! - Translate node responses into the JSON domain models
//! - Sign and broadcast native transfers
//! - Bound every call with the configured timeout

use alloy::consensus::Transaction as _;
use alloy::eips::eip2718::Encodable2718;
use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::BlockTransactions;
use async_trait::async_trait;
use std::future::IntoFuture;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::blockchain::transaction::{build_transfer, TransferParams};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, NodeConfig};
use crate::blockchain::wallet::TransferKey;
use crate::models::{Block, Transaction};
use crate::observability::metrics;
use crate::service::BlockchainService;

/// Adapter between the service contract and an Ethereum node.
#[derive(Clone)]
pub struct EthereumClient {
    provider: Arc<dyn Provider + Send + Sync>,
    config: NodeConfig,
    timeout_duration: Duration,
}

impl EthereumClient {
    /// Create a client for `config.rpc_url`.
    ///
    /// No request is sent here; an unreachable node surfaces on first use.
    pub fn new(config: NodeConfig) -> BlockchainResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        Ok(Self {
            provider,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        })
    }

    /// Log which chain the node serves. Failure is reported, not fatal.
    pub async fn probe_chain(&self) -> Option<ChainId> {
        match self.get_chain_id().await {
            Ok(chain_id) => {
                metrics::record_node_reachable(true);
                tracing::info!(
                    rpc_url = %self.config.rpc_url,
                    chain_id = chain_id.0,
                    "Connected to node"
                );
                Some(chain_id)
            }
            Err(e) => {
                metrics::record_node_reachable(false);
                tracing::warn!(
                    rpc_url = %self.config.rpc_url,
                    error = %e,
                    "Node not reachable yet, requests will fail until it is"
                );
                None
            }
        }
    }

    /// Get the chain ID used for replay-protected signing.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.call("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Run one RPC call under the timeout, recording its outcome.
    async fn call<F, T, E>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let start = Instant::now();
        let result = match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.config.rpc_timeout_secs))
            }
        };
        metrics::record_rpc(method, result.is_ok(), start);
        result
    }
}

/// Map a node transaction into the response model.
pub(crate) fn transaction_from_rpc(tx: &alloy::rpc::types::Transaction) -> Transaction {
    Transaction {
        hash: tx.inner.tx_hash().to_string(),
        value: tx.value().to_string(),
        gas: tx.gas_limit(),
        // Dynamic-fee transactions report their fee cap.
        gas_price: tx.gas_price().unwrap_or_else(|| tx.max_fee_per_gas()),
        nonce: tx.nonce(),
        to: tx.to().map(|to| to.to_string()),
        pending: tx.block_number.is_none(),
    }
}

/// Map a node block into the response model.
///
/// The block must carry full transaction objects; a hash-only body would
/// otherwise be reported as an empty block.
pub(crate) fn block_from_rpc(block: &alloy::rpc::types::Block) -> BlockchainResult<Block> {
    let transactions = match &block.transactions {
        BlockTransactions::Full(txs) => txs.iter().map(transaction_from_rpc).collect(),
        BlockTransactions::Hashes(hashes) if hashes.is_empty() => Vec::new(),
        BlockTransactions::Uncle => Vec::new(),
        BlockTransactions::Hashes(hashes) => {
            return Err(BlockchainError::Rpc(format!(
                "block {} returned {} transaction hashes instead of full transactions",
                block.header.number,
                hashes.len()
            )));
        }
    };

    Ok(Block::new(
        block.header.number,
        block.header.timestamp,
        u64::try_from(block.header.difficulty).unwrap_or(u64::MAX),
        block.header.hash.to_string(),
        transactions,
    ))
}

fn parse_address(raw: &str) -> BlockchainResult<Address> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BlockchainError::InvalidAddress("address is empty".to_string()));
    }
    Address::from_str(trimmed).map_err(|e| BlockchainError::InvalidAddress(format!("'{}': {}", trimmed, e)))
}

#[async_trait]
impl BlockchainService for EthereumClient {
    async fn get_latest_block(&self) -> BlockchainResult<Block> {
        let number = self
            .call("eth_blockNumber", self.provider.get_block_number())
            .await?;

        let block = self
            .call(
                "eth_getBlockByNumber",
                self.provider
                    .get_block_by_number(BlockNumberOrTag::Number(number))
                    .full(),
            )
            .await?
            .ok_or_else(|| BlockchainError::NotFound(format!("block {}", number)))?;

        let block = block_from_rpc(&block)?;
        tracing::debug!(
            block_number = block.block_number,
            transactions = block.transactions_count,
            "Fetched latest block"
        );
        Ok(block)
    }

    async fn get_transaction_by_hash(&self, hash: TxHash) -> BlockchainResult<Option<Transaction>> {
        let tx = self
            .call(
                "eth_getTransactionByHash",
                self.provider.get_transaction_by_hash(hash),
            )
            .await?;

        if tx.is_none() {
            tracing::debug!(tx_hash = %hash, "Transaction unknown to node");
        }
        Ok(tx.as_ref().map(transaction_from_rpc))
    }

    async fn get_address_balance(&self, address: &str) -> BlockchainResult<String> {
        let address = parse_address(address)?;
        let balance: U256 = self
            .call("eth_getBalance", self.provider.get_balance(address))
            .await?;
        Ok(balance.to_string())
    }

    async fn transfer_ethereum(
        &self,
        private_key: &str,
        to: &str,
        amount: U256,
    ) -> BlockchainResult<TxHash> {
        // Both inputs are checked before the node is contacted.
        let key = TransferKey::from_private_key(private_key)?;
        let to = parse_address(to)?;
        let from = key.address();

        let nonce = self
            .call(
                "eth_getTransactionCount",
                self.provider.get_transaction_count(from).pending(),
            )
            .await?;
        let gas_price = self.call("eth_gasPrice", self.provider.get_gas_price()).await?;
        let chain_id = self.get_chain_id().await?;

        let request = build_transfer(TransferParams {
            from,
            to,
            value: amount,
            nonce,
            gas_price,
            chain_id: chain_id.0,
        });
        let envelope = key.sign(request).await?;
        let tx_hash = *envelope.tx_hash();

        // The hash is already known locally; receipt tracking is not needed.
        let _pending = self
            .call(
                "eth_sendRawTransaction",
                self.provider.send_raw_transaction(&envelope.encoded_2718()),
            )
            .await?;

        tracing::info!(
            tx_hash = %tx_hash,
            from = %from,
            to = %to,
            nonce,
            chain_id = chain_id.0,
            "Transfer broadcast"
        );
        Ok(tx_hash)
    }
}

impl std::fmt::Debug for EthereumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
