use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use actionflow::{
    load_flow, ChainClient, ContractCall, FlowExecutor, FlowFormat, HttpRequest, HttpTransport,
    StepError, StepStatus, TransferRequest,
};

/// Chain client that hands out sequential fake transaction hashes.
#[derive(Default)]
struct DemoChain {
    nonce: AtomicU64,
}

impl DemoChain {
    fn next_hash(&self) -> Value {
        json!(format!("0x{:064x}", self.nonce.fetch_add(1, Ordering::SeqCst) + 1))
    }
}

#[async_trait]
impl ChainClient for DemoChain {
    async fn send_blockchain_call(&self, call: &ContractCall) -> Result<Value, StepError> {
        tracing::info!(address = %call.address, function = %call.function_name, "contract call");
        Ok(self.next_hash())
    }

    async fn send_transfer(&self, transfer: &TransferRequest) -> Result<Value, StepError> {
        tracing::info!(to = %transfer.to, amount = %transfer.amount, "transfer");
        Ok(self.next_hash())
    }
}

/// Transport that answers every request with a fixed quote.
struct DemoHttp;

#[async_trait]
impl HttpTransport for DemoHttp {
    async fn send(&self, request: &HttpRequest) -> Result<Value, StepError> {
        tracing::info!(method = request.method.as_str(), url = %request.url, "http request");
        Ok(json!({"price": 150, "currency": "AVAX"}))
    }
}

const FLOW: &str = r#"
label: Mint or tip
initialActionId: quote
actions:
  - id: quote
    label: Fetch quote
    type: http
    endpoint: "https://api.example.com/quote/{{collection}}"
    body:
      wallet: "{{wallet}}"
    nextActions:
      - actionId: pick
  - id: pick
    label: What next?
    type: decision
    title: "Price is {{lastResult.data.price}}"
    options:
      - label: Mint
        value: mint
        nextActionId: mint
      - label: Tip the creator
        value: tip
        nextActionId: tip
  - id: mint
    label: Mint
    type: blockchain
    address: "0x5425890298aed601595a70AB815c96711a31Bc65"
    functionName: mint
    params: ["{{wallet}}", 1]
    chains:
      source: fuji
    nextActions:
      - actionId: done
  - id: tip
    label: Tip
    type: transfer
    to: "{{creator}}"
    amount: "0.1"
    chains:
      source: fuji
    nextActions:
      - actionId: done
  - id: done
    label: Done
    type: completion
    message: "Finished with {{lastResult.data.txHandle}}"
"#;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== actionflow demo ===\n");

    let flow = match load_flow(FLOW, FlowFormat::Yaml) {
        Ok(flow) => flow,
        Err(e) => {
            eprintln!("[ERR] flow rejected: {}", e);
            std::process::exit(1);
        }
    };
    println!("[OK] flow '{}' validated ({} actions)", flow.label, flow.nodes.len());

    let mut seed = Map::new();
    seed.insert("collection".into(), json!("genesis"));
    seed.insert("wallet".into(), json!("0x8db97C7cEcE249c2b98bDC0226Cc4C2A57BF52FC"));
    seed.insert("creator".into(), json!("0x2B5AD5c4795c026514f8317c7a215E218DcCD6cF"));

    let mut executor = match FlowExecutor::builder(flow)
        .chain_client(Arc::new(DemoChain::default()))
        .http_transport(Arc::new(DemoHttp))
        .initial_context(seed)
        .build()
    {
        Ok(executor) => executor,
        Err(e) => {
            eprintln!("[ERR] {}", e);
            std::process::exit(1);
        }
    };

    while executor.current_node_id().is_some() {
        let input = if executor.is_waiting() {
            let mut input = Map::new();
            input.insert("userChoice".into(), json!("mint"));
            Some(input)
        } else {
            None
        };

        let result = executor.step(input).await;
        println!(
            "  {:<6} {:?} -> {}",
            result.node_id,
            result.status,
            result.next_node_id.as_deref().unwrap_or("-")
        );
        if result.status == StepStatus::Error {
            println!("  error: {}", result.error.unwrap_or_default());
            break;
        }
    }

    if executor.is_completed() {
        println!("\n=== Flow completed ===");
    } else if executor.is_halted() {
        println!("\n=== Flow ended without completion ===");
    }
    if let Some(last) = executor.history().last().and_then(|r| r.data.clone()) {
        println!("{}", last);
    }
}
