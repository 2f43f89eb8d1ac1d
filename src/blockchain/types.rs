//! Transfer-specific types and error definitions.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gas consumed by a plain value transfer with no call data.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Stage of the transfer pipeline an error originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Parsing addresses and the amount.
    Build,
    /// Resolving nonce, gas price and chain id.
    Prepare,
    /// Parsing the key and producing the signature.
    Sign,
    /// Handing the raw transaction to the node.
    Submit,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Build => "build",
            Stage::Prepare => "prepare",
            Stage::Sign => "sign",
            Stage::Submit => "submit",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while building, signing or submitting a transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Address or amount could not be parsed. Raised before any I/O.
    #[error("build: malformed input: {0}")]
    MalformedInput(String),

    /// Bad private key or the signature could not be produced.
    #[error("sign: signing failed: {0}")]
    SigningFailure(String),

    /// A query needed to fill the transaction failed before submission.
    #[error("prepare: {method} failed: {message}")]
    NodeQuery { method: &'static str, message: String },

    /// The node rejected the transaction or the transport failed on send.
    #[error("submit: submission failed: {message}")]
    SubmissionFailure { code: Option<i64>, message: String },

    /// No response within the configured window.
    #[error("{stage}: RPC timeout after {after:?}{}", timeout_hint(.stage))]
    Timeout { stage: Stage, after: Duration },
}

fn timeout_hint(stage: &Stage) -> &'static str {
    match stage {
        Stage::Submit => " (the node may still have received the transaction)",
        _ => "",
    }
}

impl TransferError {
    /// The pipeline stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            TransferError::MalformedInput(_) => Stage::Build,
            TransferError::SigningFailure(_) => Stage::Sign,
            TransferError::NodeQuery { .. } => Stage::Prepare,
            TransferError::SubmissionFailure { .. } => Stage::Submit,
            TransferError::Timeout { stage, .. } => *stage,
        }
    }
}

/// Result type for transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;

/// Unit an amount string is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Wei,
    Gwei,
    #[default]
    Ether,
}

impl Denomination {
    /// Number of decimal places between this unit and wei.
    pub fn decimals(&self) -> u8 {
        match self {
            Denomination::Wei => 0,
            Denomination::Gwei => 9,
            Denomination::Ether => 18,
        }
    }

    /// Unit name understood by `alloy::primitives::utils::parse_units`.
    pub fn unit_name(&self) -> &'static str {
        match self {
            Denomination::Wei => "wei",
            Denomination::Gwei => "gwei",
            Denomination::Ether => "ether",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_stage() {
        let err = TransferError::MalformedInput("recipient address is too short".into());
        assert!(err.to_string().starts_with("build:"));

        let err = TransferError::SubmissionFailure {
            code: Some(-32000),
            message: "nonce too low".into(),
        };
        assert_eq!(err.to_string(), "submit: submission failed: nonce too low");
        assert_eq!(err.stage(), Stage::Submit);
    }

    #[test]
    fn test_timeout_display() {
        let err = TransferError::Timeout {
            stage: Stage::Submit,
            after: Duration::from_secs(10),
        };
        let text = err.to_string();
        assert!(text.starts_with("submit: RPC timeout after 10s "));
        assert!(text.contains("may still have received"));

        let err = TransferError::Timeout {
            stage: Stage::Prepare,
            after: Duration::from_millis(500),
        };
        assert_eq!(err.to_string(), "prepare: RPC timeout after 500ms");
    }

    #[test]
    fn test_denomination_decimals() {
        assert_eq!(Denomination::default(), Denomination::Ether);
        assert_eq!(Denomination::Ether.decimals(), 18);
        assert_eq!(Denomination::Gwei.decimals(), 9);
        assert_eq!(Denomination::Wei.decimals(), 0);
    }
}
