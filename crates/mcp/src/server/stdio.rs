//! Stdio hosting for the n8n MCP handler.

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::info;

use crate::server::core::N8nMcpCore;
use crate::tools::Dispatcher;

/// Serve MCP over stdin/stdout until the client disconnects or `shutdown` resolves.
///
/// Stdout carries protocol frames only; logs must go to stderr.
pub async fn serve_stdio(dispatcher: Dispatcher, shutdown: impl Future<Output = ()>) -> Result<()> {
    let service = N8nMcpCore::new(dispatcher)
        .serve(stdio())
        .await
        .context("failed to start MCP stdio session")?;
    info!("MCP stdio session started");

    let cancellation = service.cancellation_token();
    tokio::select! {
        quit = service.waiting() => {
            let reason = quit.context("MCP stdio session task failed")?;
            info!(?reason, "MCP stdio session ended");
        }
        _ = shutdown => {
            info!("shutdown requested; closing MCP stdio session");
            cancellation.cancel();
        }
    }
    Ok(())
}
