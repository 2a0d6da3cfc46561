//! External capabilities the executor awaits: chain interaction and HTTP.
//!
//! The crate never signs or submits transactions itself; a [`ChainClient`]
//! implementation owned by the caller does. Any `Err` becomes an `error`
//! step result and leaves the executor on the same action.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dsl::schema::{ChainContext, HttpMethod};
use crate::error::StepError;

/// A contract call with template-substituted arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub address: String,
    pub function_name: String,
    pub params: Vec<Value>,
    pub amount: Option<Value>,
    pub chains: ChainContext,
}

/// A native-token transfer with a resolved recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub to: String,
    pub amount: Value,
    pub chains: ChainContext,
}

/// An outbound HTTP request with a resolved URL, headers and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

/// Chain interaction capability. Both calls return an opaque transaction
/// handle (typically a hash).
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn send_blockchain_call(&self, call: &ContractCall) -> Result<Value, StepError>;

    async fn send_transfer(&self, transfer: &TransferRequest) -> Result<Value, StepError>;
}

/// HTTP capability. Returns the decoded response body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<Value, StepError>;
}
