//! Streamable HTTP hosting for the n8n MCP handler.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use axum::Router;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::server::core::N8nMcpCore;
use crate::tools::Dispatcher;

/// Loopback address used when no bind address is configured.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:62890";

/// Route the MCP endpoint is mounted on.
pub const MCP_ROUTE: &str = "/mcp";

/// Parse a bind address, accepting loopback addresses only.
///
/// The endpoint acts with the authority of the configured n8n API key and has
/// no authentication of its own.
pub fn resolve_bind_address(address: &str) -> Result<SocketAddr> {
    let parsed: SocketAddr = address
        .parse()
        .with_context(|| format!("invalid MCP HTTP bind address '{address}'"))?;
    if !parsed.ip().is_loopback() {
        bail!("MCP HTTP server must bind to a loopback address; got '{address}'");
    }
    Ok(parsed)
}

/// A bound, not yet serving, MCP HTTP endpoint.
#[derive(Debug)]
pub struct McpHttpServer {
    listener: TcpListener,
    dispatcher: Dispatcher,
}

impl McpHttpServer {
    /// Bind the listener so the actual port is known before serving.
    pub async fn bind(address: SocketAddr, dispatcher: Dispatcher) -> Result<Self> {
        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("failed to bind MCP HTTP server to {address}"))?;
        Ok(Self { listener, dispatcher })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve `/mcp` until `shutdown` resolves, then close open sessions and drain.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let sessions = CancellationToken::new();
        let dispatcher = self.dispatcher;
        let service: StreamableHttpService<N8nMcpCore, LocalSessionManager> = StreamableHttpService::new(
            move || Ok(N8nMcpCore::new(dispatcher.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                stateful_mode: true,
                sse_keep_alive: None,
                cancellation_token: sessions.child_token(),
                ..Default::default()
            },
        );
        let router = Router::new().nest_service(MCP_ROUTE, service);

        info!(address = %self.listener.local_addr()?, route = MCP_ROUTE, "MCP HTTP endpoint listening");
        axum::serve(self.listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("shutdown requested; closing MCP HTTP sessions");
                sessions.cancel();
            })
            .await
            .context("MCP HTTP server failed")
    }
}
