pub mod handlers;
pub mod mcp;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
