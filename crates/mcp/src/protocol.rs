//! JSON-RPC 2.0 message types
//!
//! The facade speaks plain JSON-RPC 2.0 over a single POST endpoint:
//! `tools/list` enumerates the available tools, `tools/call` invokes one.
//! Responses echo the request id; errors carry the standard code space.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::McpError;

/// Protocol version string required on every message
pub const JSONRPC_VERSION: &str = "2.0";

/// An incoming JSON-RPC request
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    /// Request id, echoed back; absent for notifications
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// An outgoing JSON-RPC response
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    /// Successful response carrying a result value
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error response for a failed call
    pub fn failure(id: Option<Value>, error: &McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(JsonRpcError {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "protocol_test.rs"]
mod tests;
