//! Data-driven flow cases.
//!
//! Each case directory holds:
//! - `flow.json`: the flow document
//! - `state.json`: initial context, executor config, fakes and mock HTTP endpoints
//! - `steps.json`: the inputs to feed, one per `step()`, with the expected result
//! - `out.json`: the expected final state, history length and context subset
//!
//! HTTP actions go through the real [`ReqwestTransport`] against a mockito
//! server whose URL is injected into the context as `baseUrl`.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use actionflow::dsl::{parse_flow, FlowFormat};
use actionflow::{
    ChainClient, ContractCall, ExecutorConfig, ExecutorState, FakeIdGenerator, FakeTimeProvider,
    FlowExecutor, HttpPoolConfig, ReqwestTransport, RuntimeContext, StepError, StepStatus,
    TransferRequest,
};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StateFile {
    #[serde(default)]
    config: Option<ExecutorConfig>,
    #[serde(default)]
    initial_context: Map<String, Value>,
    #[serde(default)]
    fake_time: Option<i64>,
    #[serde(default)]
    fake_id: Option<String>,
    #[serde(default)]
    chain_failures: usize,
    #[serde(default)]
    mock_server: Option<Vec<MockEndpoint>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MockEndpoint {
    method: String,
    path: String,
    #[serde(default)]
    match_body: Option<Value>,
    #[serde(default = "default_status")]
    response_status: usize,
    #[serde(default)]
    response_body: Value,
    #[serde(default)]
    expect: Option<usize>,
}

fn default_status() -> usize {
    200
}

#[derive(Debug, Deserialize)]
struct StepCase {
    #[serde(default)]
    input: Option<Map<String, Value>>,
    expect: ExpectedStep,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedStep {
    status: StepStatus,
    #[serde(default)]
    node_id: Option<String>,
    #[serde(default)]
    next_node_id: Option<String>,
    #[serde(default)]
    error_contains: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedOutput {
    state: ExecutorState,
    history_len: usize,
    #[serde(default)]
    context: Map<String, Value>,
}

struct MockServerGuard {
    _server: mockito::ServerGuard,
    mocks: Vec<mockito::Mock>,
}

/// Chain client issuing `0xtx-N` handles after `failures` initial errors.
struct CaseChain {
    failures: AtomicUsize,
    counter: AtomicUsize,
}

impl CaseChain {
    fn next(&self) -> Result<Value, StepError> {
        if self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(StepError::ChainError("rpc unavailable".into()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::String(format!("0xtx-{}", n)))
    }
}

#[async_trait]
impl ChainClient for CaseChain {
    async fn send_blockchain_call(&self, _call: &ContractCall) -> Result<Value, StepError> {
        self.next()
    }

    async fn send_transfer(&self, _transfer: &TransferRequest) -> Result<Value, StepError> {
        self.next()
    }
}

pub async fn run_case(case_dir: &Path) {
    let flow_json = read_to_string(case_dir.join("flow.json"));
    let mut state: StateFile = read_json(case_dir.join("state.json"));
    let steps: Vec<StepCase> = read_json(case_dir.join("steps.json"));
    let expected: ExpectedOutput = read_json(case_dir.join("out.json"));

    let mock_server = setup_mock_server(&mut state).await;

    let flow = parse_flow(&flow_json, FlowFormat::Json)
        .unwrap_or_else(|e| panic!("Failed to parse flow.json: {}", e));

    let mut runtime = RuntimeContext::default();
    if let Some(ts) = state.fake_time {
        runtime = runtime.with_time_provider(Arc::new(FakeTimeProvider::new(ts)));
    }
    if let Some(prefix) = state.fake_id {
        runtime = runtime.with_id_generator(Arc::new(FakeIdGenerator::new(prefix)));
    }

    let transport = ReqwestTransport::new(HttpPoolConfig::default())
        .unwrap_or_else(|e| panic!("Failed to build transport: {}", e));

    let mut executor = FlowExecutor::builder(flow)
        .chain_client(Arc::new(CaseChain {
            failures: AtomicUsize::new(state.chain_failures),
            counter: AtomicUsize::new(0),
        }))
        .http_transport(Arc::new(transport))
        .initial_context(state.initial_context)
        .config(state.config.unwrap_or_default())
        .runtime_context(runtime)
        .build()
        .unwrap_or_else(|e| panic!("Flow rejected: {}", e));

    for (i, case) in steps.into_iter().enumerate() {
        let result = executor.step(case.input).await;
        let exp = case.expect;
        assert_eq!(result.status, exp.status, "step {}: {:?}", i, result);
        if let Some(node_id) = exp.node_id {
            assert_eq!(result.node_id, node_id, "step {} node id", i);
        }
        if exp.next_node_id.is_some() {
            assert_eq!(result.next_node_id, exp.next_node_id, "step {} next node", i);
        }
        if let Some(substr) = exp.error_contains {
            let err = result.error.clone().unwrap_or_default();
            assert!(
                err.contains(&substr),
                "step {}: error did not contain '{}': {}",
                i,
                substr,
                err
            );
        }
        if let Some(data) = exp.data {
            let actual = result.data.clone().unwrap_or(Value::Null);
            assert_subset(&data, &actual, &format!("step {} data", i));
        }
    }

    assert_eq!(executor.state(), &expected.state, "final state");
    assert_eq!(executor.history().len(), expected.history_len, "history length");
    assert_subset(
        &Value::Object(expected.context),
        &Value::Object(executor.context()),
        "context",
    );

    if let Some(guard) = mock_server {
        for mock in &guard.mocks {
            mock.assert_async().await;
        }
    }
}

/// Every key in `expected` must be present in `actual` with a matching
/// value; arrays and scalars compare exactly.
fn assert_subset(expected: &Value, actual: &Value, path: &str) {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            for (key, exp_val) in exp {
                let child = format!("{}.{}", path, key);
                match act.get(key) {
                    Some(act_val) => assert_subset(exp_val, act_val, &child),
                    None => panic!("{}: missing key", child),
                }
            }
        }
        _ => assert_eq!(expected, actual, "{}", path),
    }
}

async fn setup_mock_server(state: &mut StateFile) -> Option<MockServerGuard> {
    let endpoints = state.mock_server.take()?;
    if endpoints.is_empty() {
        return None;
    }

    let mut server = mockito::Server::new_async().await;
    state
        .initial_context
        .insert("baseUrl".to_string(), Value::String(server.url()));

    let mut mocks = Vec::new();
    for ep in endpoints {
        let mut mock = server.mock(ep.method.as_str(), ep.path.as_str());
        if let Some(body) = ep.match_body {
            mock = mock.match_body(mockito::Matcher::Json(body));
        }
        if let Some(expect) = ep.expect {
            mock = mock.expect(expect);
        }
        mock = mock
            .with_status(ep.response_status)
            .with_header("content-type", "application/json")
            .with_body(ep.response_body.to_string());
        mocks.push(mock.create_async().await);
    }

    Some(MockServerGuard {
        _server: server,
        mocks,
    })
}

fn read_to_string(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref()).unwrap_or_else(|e| {
        panic!("Failed to read {}: {}", path.as_ref().display(), e)
    })
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> T {
    let content = read_to_string(path.as_ref());
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.as_ref().display(), e)
    })
}
