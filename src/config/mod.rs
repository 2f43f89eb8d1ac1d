//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → config file (TOML, optional) via loader.rs
//!     → environment (ETH_TRANSFER_RPC_URL)
//!     → command-line flags
//!     → validation.rs (semantic checks)
//!     → TransferConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - The node endpoint has no default; a missing one fails before any work
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{finalize, load_config, ConfigError, RPC_URL_ENV_VAR};
pub use schema::{NodeConfig, ObservabilityConfig, TransactionConfig, TransferConfig};
