//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//! Every section has defaults except the node endpoint, which must be given.

use serde::{Deserialize, Serialize};

use crate::blockchain::types::Denomination;

/// Root configuration for the transfer client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TransferConfig {
    /// Remote node connection.
    pub node: NodeConfig,

    /// Transaction defaults.
    pub transaction: TransactionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// JSON-RPC endpoint URL. Empty means unset.
    pub rpc_url: String,

    /// Per-call RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Chain ID to sign for. Queried from the node when absent.
    pub chain_id: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            rpc_timeout_secs: 30,
            chain_id: None,
        }
    }
}

/// Transaction defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Unit amounts are expressed in.
    pub denomination: Denomination,

    /// Fixed gas price in wei. Queried from the node when absent.
    ///
    /// TOML integers stop at `i64::MAX`, so larger values are written as
    /// decimal strings.
    #[serde(with = "wei_amount")]
    pub gas_price_wei: Option<u128>,
}

mod wei_amount {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize, Serialize)]
    #[serde(untagged)]
    enum Repr {
        Integer(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<u128>, serializer: S) -> Result<S::Ok, S::Error> {
        value
            .map(|wei| match u64::try_from(wei) {
                Ok(small) => Repr::Integer(small),
                Err(_) => Repr::Text(wei.to_string()),
            })
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u128>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Integer(wei)) => Ok(Some(u128::from(wei))),
            Some(Repr::Text(text)) => text
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid wei amount '{}'", text))),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
