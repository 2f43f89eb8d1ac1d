//! Shared utilities for integration tests: an in-process JSON-RPC node.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{hex, keccak256, B256};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const CHAIN_ID: u64 = 1337;
pub const GAS_PRICE: u128 = 2_000_000_000;
/// Pending nonce of the signing account.
pub const PENDING_NONCE: u64 = 3;
/// Pending nonce reported for any other account.
pub const OTHER_ACCOUNT_NONCE: u64 = 90;

// Well-known test private key (Anvil's first account)
pub const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const SIGNER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const SENDER: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa01";
pub const RECIPIENT: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb02";

/// How the node behaves. All but `StallQueries` affect only
/// `eth_sendRawTransaction`.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum SendBehavior {
    /// Accept anything and return its hash.
    Accept,
    /// Reject every submission with this JSON-RPC error.
    Reject { code: i64, message: &'static str },
    /// Accept a transaction once, answer "already known" afterwards.
    RejectDuplicates,
    /// Wait before accepting.
    Stall(Duration),
    /// Accept but report this hash instead of the transaction's own.
    ReportHash(B256),
    /// Wait before answering nonce, gas price and chain id queries.
    StallQueries(Duration),
}

struct NodeState {
    behavior: SendBehavior,
    methods: Mutex<Vec<String>>,
    submitted: Mutex<Vec<Vec<u8>>>,
    nonce_queries: Mutex<Vec<String>>,
    seen: Mutex<HashSet<B256>>,
}

/// Handle to a running mock node.
pub struct MockNode {
    pub url: String,
    state: Arc<NodeState>,
}

#[allow(dead_code)]
impl MockNode {
    /// Start a node on an ephemeral local port.
    pub async fn start(behavior: SendBehavior) -> Self {
        let state = Arc::new(NodeState {
            behavior,
            methods: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            nonce_queries: Mutex::new(Vec::new()),
            seen: Mutex::new(HashSet::new()),
        });

        let app = Router::new()
            .route("/", post(handle_rpc))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// JSON-RPC methods called so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.state.methods.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.methods.lock().unwrap().len()
    }

    /// Raw transactions received via `eth_sendRawTransaction`, in order.
    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.state.submitted.lock().unwrap().clone()
    }

    /// Addresses passed to `eth_getTransactionCount`, lowercased.
    pub fn nonce_queries(&self) -> Vec<String> {
        self.state.nonce_queries.lock().unwrap().clone()
    }
}

/// Address of a port nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn handle_rpc(State(state): State<Arc<NodeState>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    state.methods.lock().unwrap().push(method.clone());

    if method != "eth_sendRawTransaction" {
        if let SendBehavior::StallQueries(delay) = &state.behavior {
            tokio::time::sleep(*delay).await;
        }
    }

    let outcome = match method.as_str() {
        "eth_chainId" => Ok(json!(format!("{:#x}", CHAIN_ID))),
        "eth_gasPrice" => Ok(json!(format!("{:#x}", GAS_PRICE))),
        "eth_getTransactionCount" => Ok(transaction_count(&state, &request)),
        "eth_sendRawTransaction" => send_raw(&state, &request).await,
        other => Err((
            -32601,
            format!("the method {} does not exist/is not available", other),
        )),
    };

    Json(match outcome {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
    })
}

fn transaction_count(state: &NodeState, request: &Value) -> Value {
    let address = request["params"][0]
        .as_str()
        .unwrap_or_default()
        .to_lowercase();
    let nonce = if address == SIGNER {
        PENDING_NONCE
    } else {
        OTHER_ACCOUNT_NONCE
    };
    state.nonce_queries.lock().unwrap().push(address);
    json!(format!("{:#x}", nonce))
}

async fn send_raw(state: &NodeState, request: &Value) -> Result<Value, (i64, String)> {
    let raw_hex = request["params"][0]
        .as_str()
        .ok_or((-32602i64, "missing raw transaction".to_string()))?;
    let raw = hex::decode(raw_hex).map_err(|e| (-32602i64, e.to_string()))?;
    let hash = keccak256(&raw);
    state.submitted.lock().unwrap().push(raw);

    match &state.behavior {
        SendBehavior::Accept | SendBehavior::StallQueries(_) => {
            Ok(json!(hex::encode_prefixed(hash)))
        }
        SendBehavior::Reject { code, message } => Err((*code, message.to_string())),
        SendBehavior::RejectDuplicates => {
            if state.seen.lock().unwrap().insert(hash) {
                Ok(json!(hex::encode_prefixed(hash)))
            } else {
                Err((-32000, "already known".to_string()))
            }
        }
        SendBehavior::Stall(delay) => {
            tokio::time::sleep(*delay).await;
            Ok(json!(hex::encode_prefixed(hash)))
        }
        SendBehavior::ReportHash(reported) => Ok(json!(hex::encode_prefixed(reported))),
    }
}
