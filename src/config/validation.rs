//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Fail fast when the node endpoint is missing
//! - Validate value ranges (timeout > 0, chain id > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TransferConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::loader::RPC_URL_ENV_VAR;
use crate::config::schema::TransferConfig;

/// One semantic problem with a configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a fully layered configuration.
pub fn validate_config(config: &TransferConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let rpc_url = config.node.rpc_url.trim();
    if rpc_url.is_empty() {
        errors.push(ValidationError::new(
            "node.rpc_url",
            format!(
                "required; set it in the config file, with --rpc-url, or via {}",
                RPC_URL_ENV_VAR
            ),
        ));
    } else {
        match url::Url::parse(rpc_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "node.rpc_url",
                format!("unsupported scheme '{}', expected http or https", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "node.rpc_url",
                format!("invalid URL '{}': {}", rpc_url, e),
            )),
        }
    }

    if config.node.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "node.rpc_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.node.chain_id == Some(0) {
        errors.push(ValidationError::new("node.chain_id", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
