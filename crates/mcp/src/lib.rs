//! Peek MCP - tool-calling facade over the relay
//!
//! Exposes the relay read path (session listing, history, event lookup,
//! history clearing) as JSON-RPC 2.0 tools on a single `POST /mcp`
//! endpoint. Each call is attributed to a `CallerIdentity` resolved from
//! the request; the transport connection is idempotent and its failures
//! are counted and re-raised per call.

mod error;
mod facade;
mod identity;
mod protocol;
mod tools;

pub use error::{McpError, Result};
pub use facade::{router, InProcessTransport, McpFacade, Transport};
pub use identity::CallerIdentity;
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
