//! Model Context Protocol surface: JSON-RPC envelopes, tool handlers and the
//! stdio transport. The HTTP transport lives in `api::mcp` and shares
//! [`dispatch`].

mod dispatch;
pub mod protocol;
pub mod stdio;
mod tools;

pub use dispatch::{dispatch, handle_text};
pub use protocol::{CallToolResult, JsonRpcResponse, ToolDefinition};
pub use tools::{call_tool, ToolKind, ToolRegistry};
