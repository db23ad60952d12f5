//! Name-and-arguments to result routing.

use n8n_api::N8nClient;
use rmcp::model::JsonObject;
use serde_json::Value;
use tracing::debug;

use crate::error::DispatchError;
use crate::tools::call::ToolCall;
use crate::tools::catalog::find_tool;

/// Routes tool calls to the shared [`N8nClient`].
///
/// Cloning is cheap; the underlying HTTP connection pool is shared.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: N8nClient,
}

impl Dispatcher {
    pub fn new(client: N8nClient) -> Self {
        Self { client }
    }

    /// Resolve the tool and validate its arguments without touching the network.
    ///
    /// Missing arguments are treated as an empty object.
    pub fn parse(name: &str, arguments: Option<JsonObject>) -> Result<ToolCall, DispatchError> {
        let spec = find_tool(name).ok_or_else(|| DispatchError::unknown_tool(name))?;
        spec.parse(Value::Object(arguments.unwrap_or_default()))
            .map_err(|reason| DispatchError::invalid_arguments(spec.name, reason))
    }

    /// Validate and run one tool call.
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> Result<Value, DispatchError> {
        let call = Self::parse(name, arguments)?;
        debug!(tool = name, "dispatching tool call");
        call.execute(&self.client).await
    }
}
