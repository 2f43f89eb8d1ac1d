//! ether-transfer
//!
//! Build, sign and broadcast one native-value transfer.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI flags + config file + environment
//!        │
//!        ▼
//!   ┌─────────┐    ┌─────────┐    ┌────────┐    ┌───────────┐
//!   │  build  │───▶│ prepare │───▶│  sign  │───▶│ broadcast │───▶ Remote node
//!   └─────────┘    └─────────┘    └────────┘    └───────────┘    (JSON-RPC)
//!                  nonce, gas      EIP-155        eth_send-
//!                  price, chain    legacy tx      RawTransaction
//! ```
//!
//! Prints `Transaction hash: 0x…` on success. On failure the error names the
//! stage that failed and the process exits with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::hex;
use clap::Parser;

use ether_transfer::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use ether_transfer::blockchain::{
    send_transfer, sign_transfer, Denomination, NodeClient, ParamOverrides, PrivateKey,
    TransferRequest,
};
use ether_transfer::config::{self, TransferConfig, RPC_URL_ENV_VAR};
use ether_transfer::observability::logging;

#[derive(Parser)]
#[command(name = "ether-transfer")]
#[command(about = "Sign and broadcast a single Ethereum value transfer", long_about = None)]
struct Cli {
    /// Sender address (0x-prefixed hex)
    #[arg(long)]
    from: String,

    /// Recipient address (0x-prefixed hex)
    #[arg(long)]
    to: String,

    /// Amount to send, as a decimal in --unit
    #[arg(long)]
    amount: String,

    /// Sender's private key (hex)
    #[arg(long, env = PRIVATE_KEY_ENV_VAR, hide_env_values = true)]
    private_key: String,

    /// Unit of --amount [default: from config, else ether]
    #[arg(long, value_enum)]
    unit: Option<Denomination>,

    /// JSON-RPC endpoint of the node
    #[arg(long, env = RPC_URL_ENV_VAR)]
    rpc_url: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Nonce to use instead of querying the node
    #[arg(long)]
    nonce: Option<u64>,

    /// Gas price in wei instead of querying the node
    #[arg(long)]
    gas_price_wei: Option<u128>,

    /// Chain ID to sign for instead of querying the node
    #[arg(long)]
    chain_id: Option<u64>,

    /// Per-call RPC timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Sign and print the raw transaction without broadcasting it
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn apply(&self, config: &mut TransferConfig) {
        if let Some(rpc_url) = &self.rpc_url {
            config.node.rpc_url = rpc_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.node.rpc_timeout_secs = timeout_secs;
        }
        if let Some(chain_id) = self.chain_id {
            config.node.chain_id = Some(chain_id);
        }
        if let Some(unit) = self.unit {
            config.transaction.denomination = unit;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability.log_level);

    let client = match NodeClient::from_config(&config.node) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        rpc_url = %client.rpc_url(),
        timeout_secs = config.node.rpc_timeout_secs,
        "Configuration loaded"
    );

    let overrides = ParamOverrides {
        nonce: cli.nonce,
        gas_price: cli
            .gas_price_wei
            .or(config.transaction.gas_price_wei),
        chain_id: config.node.chain_id,
    };

    let request = TransferRequest::new(
        cli.from.clone(),
        cli.to.clone(),
        PrivateKey::new(cli.private_key.clone()),
        cli.amount.clone(),
    )
    .with_unit(config.transaction.denomination)
    .with_overrides(overrides);

    if cli.dry_run {
        return match sign_transfer(&client, &request).await {
            Ok(signed) => {
                println!("Raw transaction: {}", hex::encode_prefixed(signed.raw()));
                println!("Transaction hash: {}", signed.hash());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match send_transfer(&client, &request).await {
        Ok(hash) => {
            println!("Transaction hash: {}", hash);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load(cli: &Cli) -> Result<TransferConfig, config::ConfigError> {
    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    config::finalize(config)
}
