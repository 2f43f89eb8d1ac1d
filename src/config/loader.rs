//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::TransferConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `node.rpc_url`.
pub const RPC_URL_ENV_VAR: &str = "ETH_TRANSFER_RPC_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read configuration from an optional TOML file and the environment.
///
/// Not validated: callers layer command-line overrides on top and then
/// call [`finalize`].
pub fn load_config(path: Option<&Path>) -> Result<TransferConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => TransferConfig::default(),
    };

    if let Ok(rpc_url) = std::env::var(RPC_URL_ENV_VAR) {
        if !rpc_url.trim().is_empty() {
            config.node.rpc_url = rpc_url;
        }
    }

    Ok(config)
}

/// Validate a fully layered configuration.
pub fn finalize(config: TransferConfig) -> Result<TransferConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<TransferConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}
