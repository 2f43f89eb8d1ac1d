//! Transfer subsystem.
//!
//! # Data Flow
//! ```text
//! Caller input (addresses, amount, key)
//!     → transaction.rs (build unsigned transfer, resolve nonce/gas/chain)
//!     → wallet.rs (local EIP-155 signing)
//!     → client.rs (eth_sendRawTransaction with timeout)
//!     → transaction hash or staged TransferError
//! ```
//!
//! # Security Constraints
//! - Private keys come from the caller (CLI flag or environment), never source
//! - Never log private keys
//! - All RPC calls have a configurable timeout
//! - No retries: every failure reaches the caller

pub mod client;
pub mod transaction;
pub mod transfer;
pub mod types;
pub mod units;
pub mod wallet;

pub use client::{NodeClient, SubmissionResult};
pub use transaction::{ParamOverrides, SignedTransaction, TxParams, UnsignedTransaction};
pub use transfer::{send_transfer, sign_transfer, TransferRequest};
pub use types::{Denomination, Stage, TransferError, TransferResult, TRANSFER_GAS_LIMIT};
pub use wallet::{PrivateKey, Wallet};
