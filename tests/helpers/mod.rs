#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use actionflow::dsl::schema::{
    BlockchainAction, ChainContext, CompletionAction, CompletionStatus, DecisionAction,
    DecisionOption, Edge, HttpAction, HttpMethod, Node, NodeKind, TransferAction,
};
use actionflow::{
    ChainClient, ContractCall, FakeIdGenerator, FakeTimeProvider, Flow, FlowExecutor,
    HttpRequest, HttpTransport, RuntimeContext, StepError, TransferRequest,
};

// ================================
// Mock capabilities
// ================================

/// Chain client returning `0xtx-N` handles; the first `failures` calls fail.
#[derive(Default)]
pub struct MockChain {
    pub calls: Mutex<Vec<ContractCall>>,
    pub transfers: Mutex<Vec<TransferRequest>>,
    failures: AtomicUsize,
    counter: AtomicUsize,
}

impl MockChain {
    pub fn failing(failures: usize) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            ..Default::default()
        }
    }

    fn next(&self) -> Result<Value, StepError> {
        if self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(StepError::ChainError("rpc unavailable".into()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(json!(format!("0xtx-{}", n)))
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn send_blockchain_call(&self, call: &ContractCall) -> Result<Value, StepError> {
        self.calls.lock().unwrap().push(call.clone());
        self.next()
    }

    async fn send_transfer(&self, transfer: &TransferRequest) -> Result<Value, StepError> {
        self.transfers.lock().unwrap().push(transfer.clone());
        self.next()
    }
}

/// HTTP transport replying from a queue; falls back to `default_reply`.
#[derive(Default)]
pub struct MockHttp {
    pub requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<Vec<Result<Value, StepError>>>,
    default_reply: Value,
}

impl MockHttp {
    pub fn replying(default_reply: Value) -> Self {
        Self {
            default_reply,
            ..Default::default()
        }
    }

    /// Queue replies consumed in order before the default applies.
    pub fn with_replies(self, replies: Vec<Result<Value, StepError>>) -> Self {
        *self.replies.lock().unwrap() = replies.into_iter().rev().collect();
        self
    }
}

#[async_trait]
impl HttpTransport for MockHttp {
    async fn send(&self, request: &HttpRequest) -> Result<Value, StepError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop() {
            Some(reply) => reply,
            None => Ok(self.default_reply.clone()),
        }
    }
}

pub fn fake_runtime() -> RuntimeContext {
    RuntimeContext::default()
        .with_time_provider(Arc::new(FakeTimeProvider::new(1_700_000_000)))
        .with_id_generator(Arc::new(FakeIdGenerator::new("req".into())))
}

pub fn executor_with(flow: Flow, chain: Arc<MockChain>, http: Arc<MockHttp>) -> FlowExecutor {
    FlowExecutor::builder(flow)
        .chain_client(chain)
        .http_transport(http)
        .runtime_context(fake_runtime())
        .build()
        .expect("flow should validate")
}

pub fn input(value: Value) -> Option<Map<String, Value>> {
    value.as_object().cloned()
}

// ================================
// Flow builders
// ================================

pub fn node(id: &str, kind: NodeKind, next: Vec<Edge>) -> Node {
    Node {
        id: id.into(),
        label: id.to_uppercase(),
        next_actions: next,
        kind,
    }
}

pub fn http(id: &str, endpoint: &str, next: Vec<Edge>) -> Node {
    node(
        id,
        NodeKind::Http(HttpAction {
            endpoint: endpoint.into(),
            method: HttpMethod::Post,
            headers: HashMap::new(),
            body: json!({}),
        }),
        next,
    )
}

pub fn transfer(id: &str, to: &str, amount: Value, next: Vec<Edge>) -> Node {
    node(
        id,
        NodeKind::Transfer(TransferAction {
            to: to.into(),
            amount,
            chains: ChainContext {
                source: "fuji".into(),
                destination: None,
            },
        }),
        next,
    )
}

pub fn blockchain(id: &str, function_name: &str, params: Vec<Value>, next: Vec<Edge>) -> Node {
    node(
        id,
        NodeKind::Blockchain(BlockchainAction {
            address: "0x5425890298aed601595a70AB815c96711a31Bc65".into(),
            function_name: function_name.into(),
            params,
            amount: None,
            chains: ChainContext {
                source: "fuji".into(),
                destination: None,
            },
        }),
        next,
    )
}

pub fn decision(id: &str, options: &[(&str, &str)]) -> Node {
    node(
        id,
        NodeKind::Decision(DecisionAction {
            title: None,
            options: options
                .iter()
                .map(|(value, target)| DecisionOption {
                    label: value.to_uppercase(),
                    value: (*value).into(),
                    target_node_id: (*target).into(),
                })
                .collect(),
        }),
        vec![],
    )
}

pub fn completion(id: &str, message: &str) -> Node {
    node(
        id,
        NodeKind::Completion(CompletionAction {
            message: message.into(),
            status: CompletionStatus::Success,
        }),
        vec![],
    )
}

pub fn flow(initial: &str, nodes: Vec<Node>) -> Flow {
    Flow {
        label: "test flow".into(),
        initial_node_id: initial.into(),
        nodes,
    }
}

/// http -> transfer -> completion, unconditional edges.
pub fn linear_flow() -> Flow {
    flow(
        "fetch",
        vec![
            http("fetch", "https://api.example.com/quote", vec![Edge::to("pay")]),
            transfer("pay", "0xabc", json!("1.5"), vec![Edge::to("done")]),
            completion("done", "Paid"),
        ],
    )
}
