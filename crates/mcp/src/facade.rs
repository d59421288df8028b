//! Tool facade over the relay
//!
//! `McpFacade` owns the relay handle and the transport lifecycle. The
//! transport connection is idempotent: `connect` is a no-op once connected.
//! Connection failures are recorded (error event plus a failure counter)
//! and re-raised; they are fatal to that call only.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use peek_server::RelayService;

use crate::error::{McpError, Result};
use crate::identity::CallerIdentity;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::tools;

/// Transport underneath the facade
///
/// The in-process transport always connects; tests and alternative wire
/// transports supply their own failure behavior.
pub trait Transport: Send + Sync {
    fn connect(&self) -> std::result::Result<(), String>;
}

/// Transport for a facade living in the relay process
#[derive(Debug, Default)]
pub struct InProcessTransport;

impl Transport for InProcessTransport {
    fn connect(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// JSON-RPC tool facade over the relay read path
pub struct McpFacade {
    relay: Arc<RelayService>,
    transport: Box<dyn Transport>,
    connected: AtomicBool,
    connect_failures: AtomicU64,
}

impl McpFacade {
    /// Facade over an in-process relay
    pub fn new(relay: Arc<RelayService>) -> Self {
        Self::with_transport(relay, Box::new(InProcessTransport))
    }

    /// Facade with an explicit transport
    pub fn with_transport(relay: Arc<RelayService>, transport: Box<dyn Transport>) -> Self {
        Self {
            relay,
            transport,
            connected: AtomicBool::new(false),
            connect_failures: AtomicU64::new(0),
        }
    }

    /// Connect the transport; no-op when already connected
    pub fn connect(&self) -> Result<()> {
        if self.connected.load(Ordering::Acquire) {
            return Ok(());
        }

        match self.transport.connect() {
            Ok(()) => {
                self.connected.store(true, Ordering::Release);
                Ok(())
            }
            Err(reason) => {
                let failures = self.connect_failures.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::error!(reason = %reason, failures, "transport connection failed");
                Err(McpError::Transport(reason))
            }
        }
    }

    /// Whether the transport is connected
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Number of failed connection attempts so far
    pub fn connect_failures(&self) -> u64 {
        self.connect_failures.load(Ordering::Relaxed)
    }

    /// Handle one JSON-RPC request
    pub fn handle(&self, request: JsonRpcRequest, caller: CallerIdentity) -> JsonRpcResponse {
        let id = request.id.clone();
        match self.execute(request, caller) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, &error),
        }
    }

    fn execute(&self, request: JsonRpcRequest, caller: CallerIdentity) -> Result<Value> {
        self.connect()?;

        match request.method.as_str() {
            "tools/list" => Ok(tools::definitions()),
            "tools/call" => {
                let name = request
                    .params
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| McpError::InvalidParams("missing 'name' param".into()))?;
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(Value::Object(Default::default()));
                tools::dispatch(&self.relay, name, &arguments, &caller)
            }
            other => Err(McpError::MethodNotFound(other.to_owned())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct McpQuery {
    client: Option<String>,
}

/// Build the axum router exposing the facade at `POST /mcp`
pub fn router(facade: Arc<McpFacade>) -> Router {
    Router::new().route("/mcp", post(handle_mcp)).with_state(facade)
}

async fn handle_mcp(
    State(facade): State<Arc<McpFacade>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Query(query): Query<McpQuery>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    let explicit = query.client.as_deref().or_else(|| {
        headers
            .get("x-client-name")
            .and_then(|value| value.to_str().ok())
    });
    let user_agent = headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok());
    let origin = connect_info.map(|ConnectInfo(addr)| addr.ip());

    let caller = CallerIdentity::resolve(explicit, user_agent, origin);
    Json(facade.handle(request, caller))
}

#[cfg(test)]
#[path = "facade_test.rs"]
mod tests;
