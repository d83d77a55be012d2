pub mod api;
pub mod mcp;
pub mod metrics;
pub mod state;
