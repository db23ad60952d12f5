//! n8n resource shapes and request payloads.
//!
//! Only the fields this crate validates are typed; node definitions,
//! connections, and execution data stay opaque [`Value`]s.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Page size used by list operations when the caller does not pick one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// A workflow as returned by `GET /workflows/{id}` and the write endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub nodes: Vec<Value>,
    pub connections: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_tag_names", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// One run of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: String,
    pub finished: bool,
    pub mode: String,
    pub retry_of: Option<String>,
    pub retry_success_id: Option<String>,
    pub started_at: String,
    /// `None` while the execution is still running.
    pub stopped_at: Option<String>,
    pub workflow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A webhook trigger resolved from a workflow's nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEndpoint {
    pub node_id: Option<String>,
    pub node_name: Option<String>,
    pub path: Option<String>,
    pub method: String,
    pub webhook_url: Option<String>,
}

/// Returned by delete operations, which have no meaningful upstream body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
}

impl Acknowledgement {
    pub(crate) fn deleted(kind: &str, id: &str) -> Self {
        Self {
            success: true,
            message: format!("{kind} {id} deleted successfully"),
        }
    }
}

/// Filters for `GET /workflows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowListQuery {
    pub active: Option<bool>,
    pub limit: u32,
    pub cursor: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Default for WorkflowListQuery {
    fn default() -> Self {
        Self {
            active: None,
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
            tags: None,
        }
    }
}

impl WorkflowListQuery {
    /// Query pairs in the form n8n expects; `tags` is a single comma-separated value.
    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];
        if let Some(active) = self.active {
            pairs.push(("active", active.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            pairs.push(("cursor", cursor.clone()));
        }
        if let Some(tags) = self.tags.as_ref().filter(|tags| !tags.is_empty()) {
            pairs.push(("tags", tags.join(",")));
        }
        pairs
    }
}

/// Filters for `GET /executions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionListQuery {
    pub workflow_id: Option<String>,
    pub finished: Option<bool>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl Default for ExecutionListQuery {
    fn default() -> Self {
        Self {
            workflow_id: None,
            finished: None,
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
        }
    }
}

impl ExecutionListQuery {
    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];
        if let Some(workflow_id) = &self.workflow_id {
            pairs.push(("workflowId", workflow_id.clone()));
        }
        if let Some(finished) = self.finished {
            pairs.push(("finished", finished.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            pairs.push(("cursor", cursor.clone()));
        }
        pairs
    }
}

/// Body of `POST /workflows`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkflow {
    pub name: String,
    pub nodes: Vec<Value>,
    pub connections: Map<String, Value>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body of `PATCH /workflows/{id}`; absent fields are left untouched upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl WorkflowUpdate {
    pub fn activation(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagRef {
    Name(String),
    Object { name: String },
}

/// Tags are reported either as bare names or as `{ id, name }` records
/// depending on the n8n version; both collapse to the tag name.
fn deserialize_tag_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Option::<Vec<TagRef>>::deserialize(deserializer)?;
    Ok(tags.map(|tags| {
        tags.into_iter()
            .map(|tag| match tag {
                TagRef::Name(name) | TagRef::Object { name } => name,
            })
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn workflow_json() -> Value {
        json!({
            "id": "wf-1",
            "name": "Billing Sync",
            "active": false,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z",
            "nodes": [{ "id": "n1", "type": "n8n-nodes-base.manualTrigger" }],
            "connections": {},
            "versionId": "ignored"
        })
    }

    #[test]
    fn workflow_accepts_minimal_shape() {
        let workflow: Workflow = serde_json::from_value(workflow_json()).expect("valid workflow");
        assert_eq!(workflow.id, "wf-1");
        assert_eq!(workflow.nodes.len(), 1);
        assert!(workflow.tags.is_none());
    }

    #[test]
    fn workflow_rejects_missing_required_field() {
        let mut value = workflow_json();
        value.as_object_mut().expect("object").remove("connections");
        let error = serde_json::from_value::<Workflow>(value).unwrap_err();
        assert!(error.to_string().contains("connections"));
    }

    #[test]
    fn workflow_rejects_wrong_type() {
        let mut value = workflow_json();
        value["active"] = json!("yes");
        assert!(serde_json::from_value::<Workflow>(value).is_err());
    }

    #[test]
    fn workflow_tags_accept_names_and_records() {
        let mut value = workflow_json();
        value["tags"] = json!(["finance", { "id": "7", "name": "Ops" }]);
        let workflow: Workflow = serde_json::from_value(value).expect("valid workflow");
        assert_eq!(workflow.tags, Some(vec!["finance".to_string(), "Ops".to_string()]));
    }

    #[test]
    fn execution_allows_running_state() {
        let execution: Execution = serde_json::from_value(json!({
            "id": "42",
            "finished": false,
            "mode": "manual",
            "retryOf": null,
            "retrySuccessId": null,
            "startedAt": "2024-01-01T00:00:00.000Z",
            "stoppedAt": null,
            "workflowId": "wf-1"
        }))
        .expect("valid execution");
        assert!(execution.stopped_at.is_none());
        assert!(execution.data.is_none());
    }

    #[test]
    fn workflow_query_pairs_apply_default_limit_and_join_tags() {
        let query = WorkflowListQuery {
            active: Some(true),
            tags: Some(vec!["a".into(), "b".into()]),
            ..WorkflowListQuery::default()
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![("limit", "10".to_string()), ("active", "true".to_string()), ("tags", "a,b".to_string())]
        );
    }

    #[test]
    fn execution_query_pairs_skip_absent_filters() {
        let pairs = ExecutionListQuery::default().to_query_pairs();
        assert_eq!(pairs, vec![("limit", "10".to_string())]);
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let body = serde_json::to_value(WorkflowUpdate::activation(true)).expect("serializable");
        assert_eq!(body, json!({ "active": true }));
    }
}
