use alloy::primitives::{TxHash, U256};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::blockchain::BlockchainError;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::models::{BalanceResponse, Block, HashResponse, TransferRequest};

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(default)]
    pub hash: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// Parse a 32-byte transaction hash, rejecting empty or malformed input.
pub fn parse_tx_hash(raw: &str) -> Result<TxHash, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::Validation("Malformed request: missing transaction hash".to_string()));
    }
    TxHash::from_str(raw)
        .map_err(|_| ApiError::Validation(format!("Malformed request: invalid transaction hash '{}'", raw)))
}

/// `GET /api/v1/eth/transaction?hash=...`
pub async fn get_transaction(
    State(state): State<AppState>,
    query: Result<Query<TransactionQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    lookup_transaction(&state, query.hash.as_deref().unwrap_or_default()).await
}

/// `GET /api/v1/eth/transaction/{hash}`
pub async fn get_transaction_by_path(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Response, ApiError> {
    lookup_transaction(&state, &hash).await
}

async fn lookup_transaction(state: &AppState, raw_hash: &str) -> Result<Response, ApiError> {
    // Validation happens before the service is involved.
    let hash = parse_tx_hash(raw_hash)?;

    match state.service.get_transaction_by_hash(hash).await? {
        Some(tx) => Ok((StatusCode::OK, Json(tx)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// `GET /api/v1/eth/block/latest`
///
/// A block missing at the height the node just reported is a node fault.
pub async fn get_latest_block(State(state): State<AppState>) -> Result<Json<Block>, ApiError> {
    let block = state.service.get_latest_block().await.map_err(|err| match err {
        BlockchainError::NotFound(what) => {
            BlockchainError::Rpc(format!("latest block unavailable: {}", what))
        }
        other => other,
    })?;
    Ok(Json(block))
}

/// `GET /api/v1/eth/balance/{address}`
pub async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.service.get_address_balance(&address).await?;
    Ok(Json(BalanceResponse::native(address, balance)))
}

/// `POST /api/v1/eth/transfer`
pub async fn transfer(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<HashResponse>, ApiError> {
    // Rejection text may quote body fragments, and the body holds a key.
    let Json(request) = payload.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "Request body too large".to_string(),
        },
        _ => ApiError::Validation(
            "Malformed request: expected JSON body with privKey, to and amount".to_string(),
        ),
    })?;

    let hash = state
        .service
        .transfer_ethereum(&request.priv_key, &request.to, U256::from(request.amount))
        .await?;

    Ok(Json(HashResponse { hash: hash.to_string() }))
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

pub async fn not_found() -> ApiError {
    ApiError::Rejected {
        status: StatusCode::NOT_FOUND,
        message: "No matching route found".to_string(),
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::Rejected {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: "Method not allowed for this route".to_string(),
    }
}
