//! HTTP client for the n8n public REST API (`/api/v1`).

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::{ConfigError, N8nConfig};
use crate::error::ApiError;
use crate::model::{
    Acknowledgement, Execution, ExecutionListQuery, NewWorkflow, WebhookEndpoint, Workflow, WorkflowListQuery, WorkflowUpdate,
};
use crate::{search, webhook};

/// Header carrying the n8n API key on every request.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";
const API_PREFIX: &str = "/api/v1";
/// Listing page fetched by [`N8nClient::search_workflows`] before filtering.
pub const SEARCH_FETCH_LIMIT: u32 = 100;

/// Characters escaped when an identifier is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Serialize)]
struct ExecuteBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Map<String, Value>>,
}

#[derive(Serialize)]
struct TagBody<'a> {
    name: &'a str,
}

/// Thin wrapper around a configured `reqwest::Client` for one n8n instance.
///
/// Every request goes through [`N8nClient::send`], which is the only place
/// HTTP and network failures are turned into [`ApiError`]s. The client holds
/// no mutable state and is cheap to clone.
#[derive(Debug, Clone)]
pub struct N8nClient {
    config: N8nConfig,
    http: Client,
}

impl N8nClient {
    /// Build a client with the API key and JSON headers preset.
    pub fn new(config: N8nConfig) -> Result<Self, ConfigError> {
        let mut api_key = HeaderValue::from_str(config.api_key()).map_err(|error| ConfigError::InvalidApiKey {
            reason: error.to_string(),
        })?;
        api_key.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(API_KEY_HEADER, api_key);
        default_headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .user_agent(concat!("n8n-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|error| ConfigError::HttpClient {
                reason: error.to_string(),
            })?;

        Ok(Self { config, http })
    }

    pub async fn list_workflows(&self, query: &WorkflowListQuery) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &["workflows"]).query(&query.to_query_pairs());
        self.send_json(request).await
    }

    pub async fn get_workflow(&self, id: &str) -> Result<Workflow, ApiError> {
        let request = self.request(Method::GET, &["workflows", id]);
        decode("workflow", self.send_json(request).await?)
    }

    pub async fn create_workflow(&self, workflow: &NewWorkflow) -> Result<Workflow, ApiError> {
        let request = self.request(Method::POST, &["workflows"]).json(workflow);
        decode("workflow", self.send_json(request).await?)
    }

    pub async fn update_workflow(&self, id: &str, update: &WorkflowUpdate) -> Result<Workflow, ApiError> {
        let request = self.request(Method::PATCH, &["workflows", id]).json(update);
        decode("workflow", self.send_json(request).await?)
    }

    pub async fn delete_workflow(&self, id: &str) -> Result<Acknowledgement, ApiError> {
        self.send(self.request(Method::DELETE, &["workflows", id])).await?;
        Ok(Acknowledgement::deleted("Workflow", id))
    }

    pub async fn activate_workflow(&self, id: &str) -> Result<Workflow, ApiError> {
        self.update_workflow(id, &WorkflowUpdate::activation(true)).await
    }

    pub async fn deactivate_workflow(&self, id: &str) -> Result<Workflow, ApiError> {
        self.update_workflow(id, &WorkflowUpdate::activation(false)).await
    }

    pub async fn execute_workflow(&self, id: &str, data: Option<Map<String, Value>>) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, &["workflows", id, "execute"])
            .json(&ExecuteBody { data });
        self.send_json(request).await
    }

    pub async fn list_executions(&self, query: &ExecutionListQuery) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &["executions"]).query(&query.to_query_pairs());
        self.send_json(request).await
    }

    pub async fn get_execution(&self, id: &str) -> Result<Execution, ApiError> {
        let request = self.request(Method::GET, &["executions", id]);
        decode("execution", self.send_json(request).await?)
    }

    pub async fn delete_execution(&self, id: &str) -> Result<Acknowledgement, ApiError> {
        self.send(self.request(Method::DELETE, &["executions", id])).await?;
        Ok(Acknowledgement::deleted("Execution", id))
    }

    pub async fn retry_execution(&self, id: &str) -> Result<Value, ApiError> {
        self.send_json(self.request(Method::POST, &["executions", id, "retry"])).await
    }

    pub async fn list_tags(&self) -> Result<Value, ApiError> {
        self.send_json(self.request(Method::GET, &["tags"])).await
    }

    pub async fn create_tag(&self, name: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, &["tags"]).json(&TagBody { name });
        self.send_json(request).await
    }

    pub async fn update_tag(&self, id: &str, name: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::PATCH, &["tags", id]).json(&TagBody { name });
        self.send_json(request).await
    }

    pub async fn delete_tag(&self, id: &str) -> Result<Acknowledgement, ApiError> {
        self.send(self.request(Method::DELETE, &["tags", id])).await?;
        Ok(Acknowledgement::deleted("Tag", id))
    }

    /// Credential metadata; n8n strips secret values before responding.
    pub async fn list_credentials(&self) -> Result<Value, ApiError> {
        self.send_json(self.request(Method::GET, &["credentials"])).await
    }

    /// Fetch the workflow, then derive its webhook URLs locally.
    pub async fn get_workflow_webhooks(&self, workflow_id: &str) -> Result<Vec<WebhookEndpoint>, ApiError> {
        let workflow = self.get_workflow(workflow_id).await?;
        Ok(webhook::webhook_endpoints(&workflow, self.config.base_url()))
    }

    /// Fetch the first [`SEARCH_FETCH_LIMIT`] workflows, then filter them locally.
    pub async fn search_workflows(&self, query: &str) -> Result<Vec<Value>, ApiError> {
        let listing = self
            .list_workflows(&WorkflowListQuery {
                limit: SEARCH_FETCH_LIMIT,
                ..WorkflowListQuery::default()
            })
            .await?;
        let workflows = match listing {
            Value::Object(mut page) => match page.remove("data") {
                Some(Value::Array(workflows)) => workflows,
                _ => return Err(ApiError::response_shape("workflow list", "missing `data` array")),
            },
            _ => return Err(ApiError::response_shape("workflow list", "expected a JSON object")),
        };
        Ok(search::filter_workflows(workflows, query))
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut url = format!("{}{}", self.config.base_url(), API_PREFIX);
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }
        self.http.request(method, url)
    }

    /// Perform one round trip and normalize any failure.
    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let request = request
            .build()
            .map_err(|error| ApiError::upstream(None, Some(transport_error_text(&error).as_str())))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending n8n request");

        let response = self.http.execute(request).await.map_err(|error| {
            let message = transport_error_text(&error);
            warn!(%method, %url, error = %message, "n8n request failed");
            ApiError::upstream(None, Some(message.as_str()))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| ApiError::upstream(None, Some(transport_error_text(&error).as_str())))?;

        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), "n8n request succeeded");
            return Ok(body);
        }

        let error = normalize_failure(status, &body);
        warn!(%method, %url, status = status.as_u16(), error = %error, "n8n request rejected");
        Err(error)
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let body = self.send(request).await?;
        parse_body(&body)
    }
}

fn normalize_failure(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::AuthenticationFailed,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => {
            let upstream_message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_owned));
            let transport_message = format!("Request failed with status code {}", status.as_u16());
            ApiError::upstream(upstream_message.as_deref(), Some(transport_message.as_str()))
        }
    }
}

fn parse_body(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|error| {
        let message = format!("n8n returned an invalid JSON response: {error}");
        ApiError::upstream(Some(message.as_str()), None)
    })
}

fn decode<T: DeserializeOwned>(resource: &'static str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|error| ApiError::response_shape(resource, error.to_string()))
}

/// `reqwest` keeps the useful part of network errors in the source chain.
fn transport_error_text(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        return "Request to n8n timed out".to_string();
    }
    let mut text = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
