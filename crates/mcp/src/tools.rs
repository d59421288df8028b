//! Tool definitions and dispatch
//!
//! Four read-path tools over the relay: `list_sessions`, `read_history`,
//! `find_event`, `clear_history`. Dispatch is an explicit match on the tool
//! name; results are MCP-style text content blocks.

use serde_json::{json, Value};

use peek_buffer::SessionId;
use peek_format::FormatFamily;
use peek_server::RelayService;

use crate::error::{McpError, Result};
use crate::identity::CallerIdentity;

/// Definitions for `tools/list`
pub fn definitions() -> Value {
    json!({
        "tools": [
            {
                "name": "list_sessions",
                "description": "List the ids of all sessions with buffered telemetry",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "read_history",
                "description": "Read a session's buffered telemetry, most recent first",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "session": { "type": "string" },
                        "format": {
                            "type": "string",
                            "enum": ["human", "logfmt", "json", "markdown"]
                        }
                    },
                    "required": ["session"]
                }
            },
            {
                "name": "find_event",
                "description": "Find one buffered event by its envelope event id",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "session": { "type": "string" },
                        "id": { "type": "string" },
                        "format": {
                            "type": "string",
                            "enum": ["human", "logfmt", "json", "markdown"]
                        }
                    },
                    "required": ["session", "id"]
                }
            },
            {
                "name": "clear_history",
                "description": "Clear a session's buffered telemetry",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "session": { "type": "string" }
                    },
                    "required": ["session"]
                }
            }
        ]
    })
}

/// Invoke one tool against the relay
pub fn dispatch(
    relay: &RelayService,
    name: &str,
    arguments: &Value,
    caller: &CallerIdentity,
) -> Result<Value> {
    tracing::info!(
        client = %caller.name,
        transport = caller.transport,
        tool = name,
        "tool call"
    );

    match name {
        "list_sessions" => {
            let ids: Vec<String> = relay
                .sessions()
                .iter()
                .map(|id| id.to_string())
                .collect();
            Ok(text_content(ids.join("\n")))
        }
        "read_history" => {
            let session = required_str(arguments, "session")?;
            let family = family_arg(arguments)?;
            let lines = relay.read_history(&SessionId::new(session), family)?;
            Ok(text_content(lines.join("\n")))
        }
        "find_event" => {
            let session = required_str(arguments, "session")?;
            let id = required_str(arguments, "id")?;
            let family = family_arg(arguments)?;
            let lines = relay.find_by_id(&SessionId::new(session), id, family)?;
            Ok(text_content(lines.join("\n")))
        }
        "clear_history" => {
            let session = required_str(arguments, "session")?;
            let dropped = relay.clear_history(&SessionId::new(session))?;
            Ok(text_content(format!("cleared {dropped} events")))
        }
        other => Err(McpError::ToolNotFound(other.to_owned())),
    }
}

/// MCP text content block
fn text_content(text: String) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": false
    })
}

fn required_str<'v>(arguments: &'v Value, key: &str) -> Result<&'v str> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| McpError::InvalidParams(format!("missing '{key}' argument")))
}

fn family_arg(arguments: &Value) -> Result<FormatFamily> {
    match arguments.get("format").and_then(Value::as_str) {
        Some(name) => name
            .parse()
            .map_err(|e: peek_format::UnknownFormat| McpError::InvalidParams(e.to_string())),
        None => Ok(FormatFamily::Human),
    }
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
