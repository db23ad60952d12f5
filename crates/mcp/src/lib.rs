//! Model Context Protocol (MCP) server for the n8n workflow automation platform.
//!
//! This crate exposes the n8n REST API as a fixed catalog of MCP tools. It
//! provides:
//!
//! - The ordered tool catalog with typed, schema-generating argument contracts
//! - A dispatcher that validates arguments before any request is issued
//! - An rmcp [`rmcp::ServerHandler`] rendering results as text content
//! - Stdio and loopback-only streamable HTTP hosting

pub mod error;
pub mod server;
pub mod tools;

pub use error::DispatchError;
pub use server::{DEFAULT_BIND_ADDRESS, MCP_ROUTE, McpHttpServer, N8nMcpCore, resolve_bind_address, serve_stdio};
pub use tools::{Dispatcher, ToolCall, find_tool, list_tools};
