//! End-to-end transfer: build, prepare, sign, broadcast.

use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::client::{NodeClient, SubmissionResult};
use crate::blockchain::transaction::{
    resolve_params, ParamOverrides, SignedTransaction, UnsignedTransaction,
};
use crate::blockchain::types::{Denomination, Stage, TransferResult};
use crate::blockchain::wallet::{PrivateKey, Wallet};
use crate::observability::metrics;

/// Everything a caller supplies for one transfer.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub private_key: PrivateKey,
    pub amount: String,
    pub unit: Denomination,
    pub overrides: ParamOverrides,
}

impl TransferRequest {
    /// A transfer of `amount` ether with all parameters taken from the node.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        private_key: PrivateKey,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            private_key,
            amount: amount.into(),
            unit: Denomination::Ether,
            overrides: ParamOverrides::default(),
        }
    }

    pub fn with_unit(mut self, unit: Denomination) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_overrides(mut self, overrides: ParamOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Build and sign without submitting.
///
/// The key is parsed before any node query, so a bad key never causes
/// network traffic.
pub async fn sign_transfer(
    client: &NodeClient,
    request: &TransferRequest,
) -> TransferResult<SignedTransaction> {
    let started = Instant::now();
    let tx = UnsignedTransaction::transfer(&request.from, &request.to, &request.amount, request.unit)?;
    metrics::record_stage_latency(Stage::Build, started.elapsed());

    let wallet = Wallet::from_private_key(&request.private_key)?;

    // The key's account sends the transaction, whatever `from` declares.
    let started = Instant::now();
    let params = resolve_params(client, wallet.address(), &request.overrides).await?;
    metrics::record_stage_latency(Stage::Prepare, started.elapsed());

    let started = Instant::now();
    let signed = wallet.sign(&tx, &params)?;
    metrics::record_stage_latency(Stage::Sign, started.elapsed());

    Ok(signed)
}

/// Build, sign and submit one transfer.
///
/// No step is retried. The first failing stage ends the transfer and its
/// error is returned unchanged.
pub async fn send_transfer(client: &NodeClient, request: &TransferRequest) -> SubmissionResult {
    let span = tracing::info_span!("transfer", transfer_id = %Uuid::new_v4());

    async move {
        tracing::info!(
            from = %request.from,
            to = %request.to,
            amount = %request.amount,
            unit = %request.unit,
            "Sending transfer"
        );

        let result = match sign_transfer(client, request).await {
            Ok(signed) => client.broadcast(signed).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(hash) => {
                metrics::record_outcome(None);
                tracing::info!(tx_hash = %hash, "Transfer submitted");
            }
            Err(e) => {
                metrics::record_outcome(Some(e.stage()));
                tracing::error!(stage = %e.stage(), error = %e, "Transfer failed");
            }
        }

        result
    }
    .instrument(span)
    .await
}
