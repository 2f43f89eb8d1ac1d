//! Single-transaction Ethereum transfer client.

pub mod blockchain;
pub mod config;
pub mod observability;

pub use blockchain::{send_transfer, NodeClient, TransferError, TransferRequest};
pub use config::TransferConfig;
