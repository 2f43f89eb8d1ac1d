//! Private key handling and transaction signing.
//!
//! # Security
//! - Keys are wrapped in [`PrivateKey`], whose `Debug` output is redacted
//! - Keys are never logged or serialized
//! - Signing is local and synchronous; nothing leaves the process

use std::fmt;

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, TxKind};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::blockchain::transaction::{SignedTransaction, TxParams, UnsignedTransaction};
use crate::blockchain::types::{TransferError, TransferResult};

/// Environment variable the CLI reads the private key from.
pub const PRIVATE_KEY_ENV_VAR: &str = "ETH_TRANSFER_PRIVATE_KEY";

/// A hex-encoded secp256k1 secret as supplied by the caller.
#[derive(Clone)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Signing account backed by a local private key.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key.
    ///
    /// # Arguments
    /// * `key` - 64 hex digits, with or without a 0x prefix
    ///
    /// # Security
    /// Error messages describe the shape of the key, never its content.
    pub fn from_private_key(key: &PrivateKey) -> TransferResult<Self> {
        let text = key.expose().trim();
        let key_hex = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);

        if key_hex.len() != 64 {
            return Err(TransferError::SigningFailure(format!(
                "private key must be 32 bytes (64 hex digits), got {} characters",
                key_hex.len()
            )));
        }
        if !key_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TransferError::SigningFailure(
                "private key contains non-hex characters".to_string(),
            ));
        }

        let signer: PrivateKeySigner = key_hex.parse().map_err(|_| {
            TransferError::SigningFailure("private key is not a valid secp256k1 scalar".to_string())
        })?;

        tracing::debug!(address = %signer.address(), "Signing key loaded");

        Ok(Self { signer })
    }

    /// Address derived from the private key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a transfer as a legacy EIP-155 transaction.
    ///
    /// Deterministic (RFC 6979): the same transaction, parameters and key
    /// always yield the same bytes.
    pub fn sign(
        &self,
        tx: &UnsignedTransaction,
        params: &TxParams,
    ) -> TransferResult<SignedTransaction> {
        if tx.from() != self.address() {
            tracing::warn!(
                declared_sender = %tx.from(),
                key_address = %self.address(),
                "Declared sender does not match the signing key; the key's address will send"
            );
        }

        let legacy = TxLegacy {
            chain_id: Some(params.chain_id),
            nonce: params.nonce,
            gas_price: params.gas_price,
            gas_limit: tx.gas_limit(),
            to: TxKind::Call(tx.to()),
            value: tx.value(),
            input: Bytes::new(),
        };

        let signature = self
            .signer
            .sign_hash_sync(&legacy.signature_hash())
            .map_err(|e| TransferError::SigningFailure(e.to_string()))?;

        let signed = legacy.into_signed(signature);
        let hash = *signed.hash();
        let raw = Bytes::from(TxEnvelope::Legacy(signed).encoded_2718());

        tracing::debug!(
            tx_hash = %hash,
            nonce = params.nonce,
            chain_id = params.chain_id,
            raw_len = raw.len(),
            "Transaction signed"
        );

        Ok(SignedTransaction::new(raw, hash, params.nonce))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish()
    }
}
