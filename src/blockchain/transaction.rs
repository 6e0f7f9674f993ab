//! Transfer construction.
//!
//! Only plain value transfers are built here. The gas limit is fixed, so
//! contract calls would need gas estimation first.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;

/// Gas consumed by a plain native-currency transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Inputs for a legacy (EIP-155) transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferParams {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub nonce: u64,
    pub gas_price: u128,
    pub chain_id: u64,
}

/// Build a fully populated transfer request ready for signing.
///
/// Setting `gas_price` without fee-market fields selects the legacy
/// envelope, signed with the chain id for replay protection.
pub fn build_transfer(params: TransferParams) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(params.from)
        .with_to(params.to)
        .with_value(params.value)
        .with_nonce(params.nonce)
        .with_gas_price(params.gas_price)
        .with_gas_limit(TRANSFER_GAS_LIMIT)
        .with_chain_id(params.chain_id)
}
