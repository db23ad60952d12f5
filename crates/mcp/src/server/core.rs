use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData as McpError, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{RoleServer, ServerHandler, service::RequestContext};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::tools::{Dispatcher, list_tools};

const CANCELLED_MESSAGE: &str = "Request cancelled";

/// MCP handler exposing the n8n tool catalog.
///
/// Every call reply is a single text block: pretty-printed JSON on success,
/// or `Error: <message>` when the call failed.
#[derive(Debug, Clone)]
pub struct N8nMcpCore {
    dispatcher: Dispatcher,
}

impl N8nMcpCore {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Run one tool call and render the reply text.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let text = match self.dispatcher.invoke(name, arguments).await {
            Ok(value) => render_value(value),
            Err(error) => {
                log_failure(name, &error);
                format!("Error: {error}")
            }
        };
        CallToolResult::success(vec![Content::text(text)])
    }
}

fn render_value(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => serde_json::to_string_pretty(&other).unwrap_or_else(|error| format!("Error: Failed to encode tool result: {error}")),
    }
}

fn log_failure(name: &str, error: &DispatchError) {
    match error {
        DispatchError::Upstream(api_error) if api_error.is_authentication_failure() => {
            warn!(tool = name, "n8n rejected the configured API key");
        }
        DispatchError::Upstream(api_error) => warn!(tool = name, error = %api_error, "tool call failed upstream"),
        other => debug!(tool = name, error = %other, "tool call rejected"),
    }
}

impl ServerHandler for N8nMcpCore {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(list_tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let name = request.name;
            tokio::select! {
                result = self.call(&name, request.arguments) => Ok(result),
                _ = context.ct.cancelled() => {
                    debug!(tool = %name, "tool call cancelled by client");
                    Ok(CallToolResult::success(vec![Content::text(format!("Error: {CANCELLED_MESSAGE}"))]))
                }
            }
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "n8n-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("n8n MCP".to_string()),
                ..Default::default()
            },
            instructions: Some(
                "Tools for managing an n8n instance: workflows, executions, tags, and credentials.\nUse search_workflows or list_workflows to find a workflowId before calling tools that need one.\nDelete tools are destructive and cannot be undone.".to_string(),
            ),
        }
    }
}
