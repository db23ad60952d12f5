use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use n8n_api::{DEFAULT_BASE_URL, N8nClient, N8nConfig};
use n8n_mcp::{DEFAULT_BIND_ADDRESS, Dispatcher, McpHttpServer, resolve_bind_address, serve_stdio};
use tracing::{info, warn};

/// MCP server exposing an n8n instance's REST API as tools.
#[derive(Debug, Parser)]
#[command(name = "n8n-mcp-server", version, about)]
struct Args {
    /// Base URL of the n8n instance.
    #[arg(long, env = "N8N_URL", default_value = DEFAULT_BASE_URL)]
    n8n_url: String,

    /// n8n API key, sent as `X-N8N-API-KEY`.
    #[arg(long, env = "N8N_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Per-request timeout against n8n, in seconds.
    #[arg(long, env = "N8N_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// How MCP clients connect to this server.
    #[arg(long, env = "N8N_MCP_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Loopback address for the HTTP transport.
    #[arg(long, env = "N8N_MCP_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = N8nConfig::new(&args.n8n_url, args.api_key)
        .context("invalid n8n configuration")?
        .with_timeout(Duration::from_secs(args.timeout_secs));
    if !config.has_api_key() {
        warn!("N8N_API_KEY is not set; n8n will reject authenticated requests");
    }
    info!(base_url = config.base_url(), transport = ?args.transport, "starting n8n MCP server");

    let dispatcher = Dispatcher::new(N8nClient::new(config)?);
    match args.transport {
        Transport::Stdio => serve_stdio(dispatcher, shutdown_signal()).await,
        Transport::Http => run_http(dispatcher, &args.bind).await,
    }
}

// Stdout is reserved for MCP frames, so logs go to stderr.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

async fn run_http(dispatcher: Dispatcher, bind: &str) -> Result<()> {
    let address = resolve_bind_address(bind)?;
    let server = McpHttpServer::bind(address, dispatcher).await?;
    info!(address = %server.local_addr()?, "n8n MCP server ready; press Ctrl-C to stop");
    server.serve(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for Ctrl-C; running until the transport closes");
        std::future::pending::<()>().await;
    }
}
