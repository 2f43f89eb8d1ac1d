//! JSON-RPC node client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoint
//! - Query the values needed to fill a transaction (nonce, gas price, chain id)
//! - Submit signed transactions via `eth_sendRawTransaction`
//! - Bound every call with a timeout; never retry

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::{RpcError, TransportErrorKind, TransportResult};
use tokio::time::timeout;

use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::{Stage, TransferError, TransferResult};
use crate::config::NodeConfig;
use crate::observability::metrics;

/// Outcome of a submission: the node's transaction hash or a staged error.
pub type SubmissionResult = TransferResult<TxHash>;

/// Client for a single remote execution node.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct NodeClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: url::Url,
    timeout_duration: Duration,
}

impl NodeClient {
    /// Create a client for `rpc_url`.
    ///
    /// No request is made here; connectivity problems surface on first use.
    ///
    /// # Arguments
    /// * `rpc_url` - http(s) JSON-RPC endpoint
    /// * `timeout_duration` - Deadline applied to each RPC call
    pub fn new(rpc_url: &str, timeout_duration: Duration) -> TransferResult<Self> {
        let url: url::Url = rpc_url.parse().map_err(|e| {
            TransferError::MalformedInput(format!("invalid RPC URL '{}': {}", rpc_url, e))
        })?;

        let provider = ProviderBuilder::new().connect_http(url.clone());

        tracing::debug!(
            rpc_url = %url,
            timeout_ms = timeout_duration.as_millis() as u64,
            "Node client created"
        );

        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: url,
            timeout_duration,
        })
    }

    /// Create a client from validated configuration.
    pub fn from_config(config: &NodeConfig) -> TransferResult<Self> {
        Self::new(&config.rpc_url, Duration::from_secs(config.rpc_timeout_secs))
    }

    /// Get the chain ID reported by the node.
    pub async fn chain_id(&self) -> TransferResult<u64> {
        self.query("eth_chainId", self.provider.get_chain_id()).await
    }

    /// Get the current gas price in wei.
    pub async fn gas_price(&self) -> TransferResult<u128> {
        self.query("eth_gasPrice", self.provider.get_gas_price()).await
    }

    /// Get the next nonce for `address`, counting pending transactions.
    pub async fn pending_nonce(&self, address: Address) -> TransferResult<u64> {
        self.query(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).pending(),
        )
        .await
    }

    /// Submit a signed transaction.
    ///
    /// Exactly one `eth_sendRawTransaction` request is made. Node-side
    /// rejections are returned verbatim as `SubmissionFailure`.
    pub async fn broadcast(&self, tx: SignedTransaction) -> SubmissionResult {
        let started = Instant::now();
        let call = self.provider.send_raw_transaction(tx.raw());
        let result = timeout(self.timeout_duration, call).await;
        metrics::record_stage_latency(Stage::Submit, started.elapsed());

        match result {
            Ok(Ok(pending)) => {
                let node_hash = *pending.tx_hash();
                if node_hash != tx.hash() {
                    tracing::warn!(
                        local_hash = %tx.hash(),
                        node_hash = %node_hash,
                        "Node reported a different transaction hash"
                    );
                }
                tracing::info!(tx_hash = %node_hash, nonce = tx.nonce(), "Transaction accepted by node");
                Ok(node_hash)
            }
            Ok(Err(e)) => {
                let err = submission_failure(e);
                tracing::warn!(tx_hash = %tx.hash(), error = %err, "Transaction rejected");
                Err(err)
            }
            Err(_) => {
                tracing::warn!(
                    tx_hash = %tx.hash(),
                    timeout_ms = self.timeout_duration.as_millis() as u64,
                    "Submission timed out"
                );
                Err(TransferError::Timeout {
                    stage: Stage::Submit,
                    after: self.timeout_duration,
                })
            }
        }
    }

    /// Endpoint this client talks to.
    pub fn rpc_url(&self) -> &url::Url {
        &self.rpc_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_duration
    }

    async fn query<F, T>(&self, method: &'static str, call: F) -> TransferResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(self.timeout_duration, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(method = method, error = %e, "RPC error");
                Err(TransferError::NodeQuery {
                    method,
                    message: e.to_string(),
                })
            }
            Err(_) => {
                tracing::warn!(method = method, "RPC timeout");
                Err(TransferError::Timeout {
                    stage: Stage::Prepare,
                    after: self.timeout_duration,
                })
            }
        }
    }
}

/// Keep the node's own wording for JSON-RPC error responses.
fn submission_failure(err: RpcError<TransportErrorKind>) -> TransferError {
    match err.as_error_resp() {
        Some(payload) => TransferError::SubmissionFailure {
            code: Some(payload.code),
            message: payload.message.to_string(),
        },
        None => TransferError::SubmissionFailure {
            code: None,
            message: err.to_string(),
        },
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
