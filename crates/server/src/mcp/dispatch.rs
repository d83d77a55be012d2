//! Routes JSON-RPC messages to MCP handlers.

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::protocol::{
    CallToolParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS,
    INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
    SERVER_NAME,
};
use super::tools::call_tool;
use crate::state::AppState;

/// Handle one raw message. `None` means nothing should be written back.
pub async fn handle_text(state: &AppState, text: &str) -> Option<JsonRpcResponse> {
    match serde_json::from_str::<Value>(text) {
        Ok(message) => dispatch(state, message).await,
        Err(e) => {
            warn!(error = %e, "Unparseable JSON-RPC message");
            Some(JsonRpcResponse::failure(
                Value::Null,
                JsonRpcError::new(PARSE_ERROR, "Parse error"),
            ))
        }
    }
}

/// Handle one decoded message.
pub async fn dispatch(state: &AppState, message: Value) -> Option<JsonRpcResponse> {
    let id_hint = message.get("id").cloned().unwrap_or(Value::Null);

    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(req) => req,
        Err(e) => {
            debug!(error = %e, "Invalid JSON-RPC request");
            return Some(JsonRpcResponse::failure(
                id_hint,
                JsonRpcError::new(INVALID_REQUEST, "Invalid Request"),
            ));
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return Some(JsonRpcResponse::failure(
            request.id.unwrap_or(Value::Null),
            JsonRpcError::new(INVALID_REQUEST, "Invalid Request"),
        ));
    }

    let Some(id) = request.id.clone() else {
        debug!(method = %request.method, "Notification received");
        return None;
    };

    let outcome = match request.method.as_str() {
        "initialize" => Ok(initialize_result()),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": state.tools().definitions() })),
        "tools/call" => call(state, request.params).await,
        other => Err(JsonRpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        )),
    };

    Some(match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(error) => JsonRpcResponse::failure(id, error),
    })
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "logging": {},
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

async fn call(state: &AppState, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let params: CallToolParams = params
        .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "Missing params"))
        .and_then(|p| {
            serde_json::from_value(p)
                .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))
        })?;

    let kind = state.tools().resolve(&params.name).ok_or_else(|| {
        JsonRpcError::new(INVALID_PARAMS, format!("Unknown tool: {}", params.name))
    })?;

    let args = params.arguments.unwrap_or_default();
    let result = call_tool(state, kind, &args).await;

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Unserializable result: {e}")))
}
