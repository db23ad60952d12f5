//! n8n API client utilities.
//!
//! This crate provides a lightweight client for the n8n public REST API.
//! It focuses on:
//!
//! - Constructing an HTTP client with the `X-N8N-API-KEY` header preset
//! - Validating the configured base URL
//! - Mapping every HTTP or network failure to one [`ApiError`]
//! - Validating workflow and execution payloads against their expected shape
//!
//! The primary entry point is [`N8nClient`].
//!
//! # Example
//!
//! ```ignore
//! use n8n_api::{N8nClient, N8nConfig, WorkflowListQuery};
//!
//! async fn run() -> anyhow::Result<()> {
//!     let client = N8nClient::new(N8nConfig::new("http://localhost:5678", "my-key")?)?;
//!     let page = client.list_workflows(&WorkflowListQuery::default()).await?;
//!     println!("{page:#}");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod model;
mod search;
mod webhook;

pub use client::{API_KEY_HEADER, N8nClient, SEARCH_FETCH_LIMIT};
pub use config::{ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, N8nConfig};
pub use error::ApiError;
pub use model::{
    Acknowledgement, DEFAULT_PAGE_LIMIT, Execution, ExecutionListQuery, NewWorkflow, WebhookEndpoint, Workflow, WorkflowListQuery,
    WorkflowUpdate,
};
pub use search::filter_workflows;
pub use webhook::{WEBHOOK_NODE_TYPE, webhook_endpoints};
