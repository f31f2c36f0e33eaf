//! MCP method dispatch and the stdio transport.
//!
//! Line-delimited JSON-RPC over stdin/stdout. Failures of a known tool
//! never become JSON-RPC errors: they come back as `isError` text content
//! carrying only the caller-safe message, so the transport stays usable and
//! the calling model sees nothing internal. Calling a tool that does not
//! exist is a protocol mistake and gets an invalid-request error frame.

use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, warn};

use crate::error::BridgeError;
use crate::tools::ToolRegistry;

use super::protocol;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "taskbridge";

/// The nine tool definitions in MCP format.
fn tool_definitions(registry: &ToolRegistry) -> serde_json::Value {
    let tools: Vec<serde_json::Value> = registry
        .tools()
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name(),
                "description": tool.description(),
                "inputSchema": tool.parameters().schema,
            })
        })
        .collect();
    json!({ "tools": tools })
}

/// Dispatch one MCP JSON-RPC request.
pub async fn dispatch(
    registry: &ToolRegistry,
    method: &str,
    params: &serde_json::Value,
) -> Result<serde_json::Value, (i32, String)> {
    debug!(method, "MCP method dispatch");

    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false },
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }
        })),

        "notifications/initialized" => Ok(json!({})),

        "tools/list" => Ok(tool_definitions(registry)),

        "tools/call" => {
            let name = params["name"]
                .as_str()
                .ok_or_else(|| (protocol::INVALID_REQUEST, "missing tool name".to_string()))?;
            let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

            match registry.dispatch(name, arguments).await {
                Ok(text) => Ok(json!({
                    "content": [{ "type": "text", "text": text }],
                })),
                // A name outside the registry is a protocol-level mistake,
                // not a tool failure.
                Err(BridgeError::UnknownTool(tool)) => Err((
                    protocol::INVALID_REQUEST,
                    format!("unknown tool: {tool}"),
                )),
                // Detail was already logged by the registry; only the
                // sanitized message crosses the wire.
                Err(err) => Ok(json!({
                    "content": [{ "type": "text", "text": err.caller_message() }],
                    "isError": true,
                })),
            }
        }

        "ping" => Ok(json!({})),

        _ => {
            warn!(method, "unknown MCP method");
            Err((protocol::METHOD_NOT_FOUND, format!("unknown method: {method}")))
        }
    }
}

/// Process one wire line; `None` means no response (notification).
pub async fn process_line(registry: &ToolRegistry, line: &str) -> Option<String> {
    let req: protocol::JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "failed to parse JSON-RPC request");
            return Some(protocol::serialize_response(
                None,
                Err((protocol::PARSE_ERROR, format!("parse error: {e}"))),
            ));
        }
    };

    let id = req.id.clone();
    let is_notification = id.is_none();

    let result = dispatch(registry, &req.method, &req.params).await;

    if is_notification {
        return None;
    }

    Some(protocol::serialize_response(id, result))
}

/// Serve MCP over stdin/stdout until EOF.
pub async fn run_stdio(registry: ToolRegistry) {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(resp) = process_line(&registry, &line).await {
            let mut out = resp.into_bytes();
            out.push(b'\n');
            if let Err(e) = stdout.write_all(&out).await {
                error!(error = %e, "failed to write to stdout");
                break;
            }
            if let Err(e) = stdout.flush().await {
                error!(error = %e, "failed to flush stdout");
                break;
            }
        }
    }
}
