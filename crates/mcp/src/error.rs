//! Facade error types

use thiserror::Error;

use peek_server::ServerError;

/// Errors raised by the tool facade
#[derive(Debug, Error)]
pub enum McpError {
    /// Unknown JSON-RPC method
    #[error("method '{0}' not found")]
    MethodNotFound(String),

    /// Unknown tool name in a `tools/call`
    #[error("tool '{0}' not found")]
    ToolNotFound(String),

    /// Malformed or missing tool arguments
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Relay read-path failure (unknown session, lookup miss)
    #[error(transparent)]
    Relay(#[from] ServerError),

    /// Transport connection failure
    #[error("transport connection failed: {0}")]
    Transport(String),
}

impl McpError {
    /// JSON-RPC 2.0 error code
    pub fn code(&self) -> i64 {
        match self {
            Self::MethodNotFound(_) => -32601,
            Self::ToolNotFound(_) => -32602,
            Self::InvalidParams(_) => -32602,
            Self::Relay(_) => -32000,
            Self::Transport(_) => -32001,
        }
    }
}

/// Result type for facade operations
pub type Result<T> = std::result::Result<T, McpError>;
