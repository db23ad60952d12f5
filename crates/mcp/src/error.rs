//! Failures of a single tool invocation.

use n8n_api::ApiError;
use thiserror::Error;

/// Why a tool call produced no result.
///
/// `Display` is the text shown to the caller after the `Error: ` prefix.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },

    #[error(transparent)]
    Upstream(#[from] ApiError),

    #[error("Failed to encode tool result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    pub fn invalid_arguments(tool: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool,
            reason: reason.into(),
        }
    }
}
