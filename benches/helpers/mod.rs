#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::runtime::{Builder, Runtime};

use actionflow::{
    ChainClient, ContractCall, Flow, HttpRequest, HttpTransport, StepError, TransferRequest,
};

pub fn bench_runtime() -> Runtime {
    Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build runtime")
}

pub struct NoopChain;

#[async_trait]
impl ChainClient for NoopChain {
    async fn send_blockchain_call(&self, _call: &ContractCall) -> Result<Value, StepError> {
        Ok(json!("0x0"))
    }

    async fn send_transfer(&self, _transfer: &TransferRequest) -> Result<Value, StepError> {
        Ok(json!("0x0"))
    }
}

pub struct NoopHttp;

#[async_trait]
impl HttpTransport for NoopHttp {
    async fn send(&self, _request: &HttpRequest) -> Result<Value, StepError> {
        Ok(json!({"v": 1}))
    }
}

/// `n` chained transfer actions ending in a completion.
pub fn linear_flow(n: usize) -> Flow {
    let mut actions: Vec<Value> = (0..n)
        .map(|i| {
            let next = if i + 1 == n {
                "end".to_string()
            } else {
                format!("n{}", i + 1)
            };
            json!({
                "id": format!("n{}", i),
                "label": format!("N{}", i),
                "type": "transfer",
                "to": "{{wallet}}",
                "amount": "{{lastResult.data.amount}}",
                "nextActions": [{"actionId": next}]
            })
        })
        .collect();
    actions.push(json!({"id": "end", "label": "End", "type": "completion", "message": "done"}));
    let initial = if n == 0 { "end" } else { "n0" };
    serde_json::from_value(json!({
        "label": "bench",
        "initialActionId": initial,
        "actions": actions,
    }))
    .expect("bench flow is well-formed")
}

/// A decision fanning out to `width` branches, each a single http action.
pub fn fan_out_flow(width: usize) -> Flow {
    let options: Vec<Value> = (0..width)
        .map(|i| {
            json!({
                "label": format!("B{}", i),
                "value": format!("b{}", i),
                "nextActionId": format!("b{}", i)
            })
        })
        .collect();
    let mut actions = vec![json!({
        "id": "pick",
        "label": "Pick",
        "type": "decision",
        "options": options
    })];
    for i in 0..width {
        actions.push(json!({
            "id": format!("b{}", i),
            "label": format!("B{}", i),
            "type": "http",
            "endpoint": "https://api.example.com/{{wallet}}",
            "nextActions": [
                {"actionId": "end", "conditions": [{"field": "lastResult.data.v", "operator": "eq", "value": 1}]},
                {"actionId": "end"}
            ]
        }));
    }
    actions.push(json!({"id": "end", "label": "End", "type": "completion", "message": "done"}));
    serde_json::from_value(json!({
        "label": "fan-out",
        "initialActionId": "pick",
        "actions": actions,
    }))
    .expect("bench flow is well-formed")
}
