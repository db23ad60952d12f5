mod core;
mod http;
mod stdio;

pub use core::N8nMcpCore;
pub use http::{DEFAULT_BIND_ADDRESS, MCP_ROUTE, McpHttpServer, resolve_bind_address};
pub use stdio::serve_stdio;
