//! Ethereum node gateway library.
//!
//! A thin HTTP API over an Ethereum JSON-RPC node: latest block,
//! transaction lookup, balances and signed native transfers.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod service;

pub use blockchain::EthereumClient;
pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use service::{BlockchainService, SharedService};
