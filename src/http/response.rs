//! Error-to-response mapping.
//!
//! Every failure leaves the server as `{"message": "..."}` with a status:
//! - malformed input (missing hash, bad address, bad key) → 400
//! - entity missing on the node → 404
//! - node, timeout and signing failures → 500
//!
//! Responses produced by middleware (body limit, request timeout) are
//! rewrapped by [`ensure_error_envelope`].

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::blockchain::BlockchainError;
use crate::models::ErrorBody;

/// Errors returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request parameter.
    Validation(String),
    /// Request rejected before reaching a handler body (size, route).
    Rejected { status: StatusCode, message: String },
    /// Failure reported by the blockchain service.
    Service(BlockchainError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Service(err) => match err {
                BlockchainError::InvalidAddress(_) | BlockchainError::InvalidPrivateKey(_) => {
                    StatusCode::BAD_REQUEST
                }
                BlockchainError::NotFound(_) => StatusCode::NOT_FOUND,
                BlockchainError::Rpc(_)
                | BlockchainError::Timeout(_)
                | BlockchainError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Service(err) => err.to_string(),
        }
    }
}

impl From<BlockchainError> for ApiError {
    fn from(err: BlockchainError) -> Self {
        ApiError::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

/// Rewrap error responses that do not already carry the JSON envelope.
pub async fn ensure_error_envelope(response: Response) -> Response {
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return response;
    }

    let message = status.canonical_reason().unwrap_or("Request failed").to_string();
    let mut enveloped = ApiError::Rejected { status, message }.into_response();
    for (name, value) in response.headers() {
        if *name != header::CONTENT_TYPE && *name != header::CONTENT_LENGTH {
            enveloped.headers_mut().append(name.clone(), value.clone());
        }
    }
    enveloped
}
