//! Transaction building and parameter resolution.
//!
//! # Responsibilities
//! - Build unsigned transfers from caller input (pure, no I/O)
//! - Resolve nonce, gas price and chain id, querying the node only for
//!   values the caller did not supply
//! - Carry the signed envelope to the broadcaster

use alloy::primitives::{Address, Bytes, TxHash, U256};

use crate::blockchain::client::NodeClient;
use crate::blockchain::types::{Denomination, TransferResult, TRANSFER_GAS_LIMIT};
use crate::blockchain::units::{parse_address, parse_amount};

/// A plain value transfer that has not been signed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    from: Address,
    to: Address,
    gas_limit: u64,
    value: U256,
}

impl UnsignedTransaction {
    /// Build a transfer from textual input.
    ///
    /// # Arguments
    /// * `from` - Sender address (0x-prefixed hex)
    /// * `to` - Recipient address (0x-prefixed hex)
    /// * `amount` - Decimal amount expressed in `unit`
    /// * `unit` - Denomination of `amount`
    pub fn transfer(
        from: &str,
        to: &str,
        amount: &str,
        unit: Denomination,
    ) -> TransferResult<Self> {
        let from = parse_address("sender", from)?;
        let to = parse_address("recipient", to)?;
        let value = parse_amount(amount, unit)?;

        Ok(Self {
            from,
            to,
            gas_limit: TRANSFER_GAS_LIMIT,
            value,
        })
    }

    pub fn from(&self) -> Address {
        self.from
    }

    pub fn to(&self) -> Address {
        self.to
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Amount in wei.
    pub fn value(&self) -> U256 {
        self.value
    }
}

/// Fields the signer needs beyond the transfer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParams {
    pub nonce: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    /// Chain ID for EIP-155 replay protection.
    pub chain_id: u64,
}

/// Caller-supplied values that take precedence over node queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamOverrides {
    pub nonce: Option<u64>,
    pub gas_price: Option<u128>,
    pub chain_id: Option<u64>,
}

impl ParamOverrides {
    /// All three values are present, so no node query is needed.
    pub fn complete(&self) -> Option<TxParams> {
        Some(TxParams {
            nonce: self.nonce?,
            gas_price: self.gas_price?,
            chain_id: self.chain_id?,
        })
    }
}

/// Resolve signing parameters for `sender`, the address of the signing key.
///
/// Overrides are used verbatim. Missing values are fetched from the node:
/// the nonce from the pending block tag, the gas price from `eth_gasPrice`
/// and the chain id from `eth_chainId`. The nonce is read, never reserved.
pub async fn resolve_params(
    client: &NodeClient,
    sender: Address,
    overrides: &ParamOverrides,
) -> TransferResult<TxParams> {
    if let Some(params) = overrides.complete() {
        return Ok(params);
    }

    let nonce = match overrides.nonce {
        Some(nonce) => nonce,
        None => client.pending_nonce(sender).await?,
    };
    let gas_price = match overrides.gas_price {
        Some(gas_price) => gas_price,
        None => client.gas_price().await?,
    };
    let chain_id = match overrides.chain_id {
        Some(chain_id) => chain_id,
        None => client.chain_id().await?,
    };

    tracing::debug!(
        sender = %sender,
        nonce = nonce,
        gas_price = gas_price,
        chain_id = chain_id,
        "Transaction parameters resolved"
    );

    Ok(TxParams {
        nonce,
        gas_price,
        chain_id,
    })
}

/// A signed, serialized transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    raw: Bytes,
    hash: TxHash,
    nonce: u64,
}

impl SignedTransaction {
    pub(crate) fn new(raw: Bytes, hash: TxHash, nonce: u64) -> Self {
        Self { raw, hash, nonce }
    }

    /// EIP-2718 encoded envelope.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Keccak-256 of the raw envelope.
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}
