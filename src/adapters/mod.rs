//! Transport traits for reaching a chain's RPC endpoint.
//!
//! The faucet client and confirmation poller speak JSON-RPC through
//! [`RpcTransport`], so tests can swap in a scripted endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::Result;
use crate::network::NetworkProfile;

pub mod solana;

/// JSON-RPC 2.0 request envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: 1,
            method: method.to_string(),
            params,
        }
    }
}

/// JSON-RPC error object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl core::fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// JSON-RPC 2.0 response envelope. Exactly one of `result` / `error` is expected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    pub fn success(result: Value) -> Self {
        Self { result: Some(result), error: None }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(RpcErrorObject { code, message: message.into(), data: None }),
        }
    }
}

/// Failures below the JSON-RPC layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection, IO, timeout or undecodable body
    #[error("{0}")]
    Unreachable(String),
    /// The server answered with a non-success status and no JSON-RPC body
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
}

/// One JSON-RPC round trip per call.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, request: RpcRequest) -> core::result::Result<RpcResponse, TransportError>;

    /// Endpoint this transport talks to, for logging.
    fn endpoint(&self) -> &str;
}

/// Builds the connection context for a resolved network.
pub trait Connector: Send + Sync {
    fn connect(&self, profile: &NetworkProfile) -> Result<Arc<dyn RpcTransport>>;
}

impl<T: Connector + ?Sized> Connector for Arc<T> {
    fn connect(&self, profile: &NetworkProfile) -> Result<Arc<dyn RpcTransport>> {
        (**self).connect(profile)
    }
}
