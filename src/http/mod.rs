//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request id, tracing span)
//!     → handlers.rs (extract, validate, call BlockchainService)
//!     → response.rs (JSON body or error envelope)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeUuidRequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
