//! Argument contracts for each tool.
//!
//! Each struct is both the validator (through `serde`) and the advertised
//! input schema (through `schemars`), so the two cannot drift apart.

use n8n_api::{DEFAULT_PAGE_LIMIT, ExecutionListQuery, NewWorkflow, WorkflowListQuery, WorkflowUpdate};
use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A typed tool argument payload.
pub trait ToolArgs: DeserializeOwned + JsonSchema {
    /// Checks `serde` cannot express, run after a successful parse.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

/// Identifiers end up as URL path segments; empty and dot segments would
/// address a different endpoint.
fn check_identifier(field: &str, value: &str) -> Result<(), String> {
    match value.trim() {
        "" => Err(format!("`{field}` must not be empty")),
        "." | ".." => Err(format!("`{field}` is not a valid identifier")),
        _ => Ok(()),
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct NoArgs {}

impl ToolArgs for NoArgs {}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkflowsArgs {
    #[schemars(description = "Filter by active status")]
    pub active: Option<bool>,
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of workflows to return")]
    pub limit: u32,
    #[schemars(description = "Cursor for pagination")]
    pub cursor: Option<String>,
    #[schemars(description = "Filter by tags")]
    pub tags: Option<Vec<String>>,
}

impl ToolArgs for ListWorkflowsArgs {}

impl From<ListWorkflowsArgs> for WorkflowListQuery {
    fn from(args: ListWorkflowsArgs) -> Self {
        Self {
            active: args.active,
            limit: args.limit,
            cursor: args.cursor,
            tags: args.tags,
        }
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowIdArgs {
    #[schemars(description = "The ID of the workflow", length(min = 1))]
    pub workflow_id: String,
}

impl ToolArgs for WorkflowIdArgs {
    fn check(&self) -> Result<(), String> {
        check_identifier("workflowId", &self.workflow_id)
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowArgs {
    #[schemars(description = "Name of the workflow")]
    pub name: String,
    #[schemars(description = "Array of workflow nodes")]
    pub nodes: Vec<Value>,
    #[schemars(description = "Node connections object")]
    pub connections: Map<String, Value>,
    #[serde(default)]
    #[schemars(description = "Whether to activate the workflow")]
    pub active: bool,
    #[schemars(description = "Workflow settings")]
    pub settings: Option<Map<String, Value>>,
    #[schemars(description = "Tags for the workflow")]
    pub tags: Option<Vec<String>>,
}

impl ToolArgs for CreateWorkflowArgs {}

impl From<CreateWorkflowArgs> for NewWorkflow {
    fn from(args: CreateWorkflowArgs) -> Self {
        Self {
            name: args.name,
            nodes: args.nodes,
            connections: args.connections,
            active: args.active,
            settings: args.settings,
            tags: args.tags,
        }
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkflowArgs {
    #[schemars(description = "The ID of the workflow to update", length(min = 1))]
    pub workflow_id: String,
    #[schemars(description = "New name for the workflow")]
    pub name: Option<String>,
    #[schemars(description = "Updated nodes array")]
    pub nodes: Option<Vec<Value>>,
    #[schemars(description = "Updated connections object")]
    pub connections: Option<Map<String, Value>>,
    #[schemars(description = "Activation status")]
    pub active: Option<bool>,
    #[schemars(description = "Updated workflow settings")]
    pub settings: Option<Map<String, Value>>,
    #[schemars(description = "Updated tags")]
    pub tags: Option<Vec<String>>,
}

impl ToolArgs for UpdateWorkflowArgs {
    fn check(&self) -> Result<(), String> {
        check_identifier("workflowId", &self.workflow_id)
    }
}

impl UpdateWorkflowArgs {
    /// Split the target identifier from the fields to patch.
    pub fn into_parts(self) -> (String, WorkflowUpdate) {
        let update = WorkflowUpdate {
            name: self.name,
            nodes: self.nodes,
            connections: self.connections,
            active: self.active,
            settings: self.settings,
            tags: self.tags,
        };
        (self.workflow_id, update)
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteWorkflowArgs {
    #[schemars(description = "The ID of the workflow to execute", length(min = 1))]
    pub workflow_id: String,
    #[schemars(description = "Input data for the workflow execution")]
    pub data: Option<Map<String, Value>>,
}

impl ToolArgs for ExecuteWorkflowArgs {
    fn check(&self) -> Result<(), String> {
        check_identifier("workflowId", &self.workflow_id)
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetExecutionsArgs {
    #[schemars(description = "Filter by workflow ID")]
    pub workflow_id: Option<String>,
    #[schemars(description = "Filter by execution status")]
    pub finished: Option<bool>,
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of executions to return")]
    pub limit: u32,
    #[schemars(description = "Cursor for pagination")]
    pub cursor: Option<String>,
}

impl ToolArgs for GetExecutionsArgs {}

impl From<GetExecutionsArgs> for ExecutionListQuery {
    fn from(args: GetExecutionsArgs) -> Self {
        Self {
            workflow_id: args.workflow_id,
            finished: args.finished,
            limit: args.limit,
            cursor: args.cursor,
        }
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionIdArgs {
    #[schemars(description = "The ID of the execution", length(min = 1))]
    pub execution_id: String,
}

impl ToolArgs for ExecutionIdArgs {
    fn check(&self) -> Result<(), String> {
        check_identifier("executionId", &self.execution_id)
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagNameArgs {
    #[schemars(description = "Name of the tag")]
    pub name: String,
}

impl ToolArgs for TagNameArgs {}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagArgs {
    #[schemars(description = "The ID of the tag to update", length(min = 1))]
    pub tag_id: String,
    #[schemars(description = "New name for the tag")]
    pub name: String,
}

impl ToolArgs for UpdateTagArgs {
    fn check(&self) -> Result<(), String> {
        check_identifier("tagId", &self.tag_id)
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagIdArgs {
    #[schemars(description = "The ID of the tag to delete", length(min = 1))]
    pub tag_id: String,
}

impl ToolArgs for TagIdArgs {
    fn check(&self) -> Result<(), String> {
        check_identifier("tagId", &self.tag_id)
    }
}

#[derive(JsonSchema, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    #[schemars(description = "Search query")]
    pub query: String,
}

impl ToolArgs for SearchArgs {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_workflows_defaults_limit() {
        let args: ListWorkflowsArgs = serde_json::from_value(json!({})).expect("empty payload is valid");
        assert_eq!(args.limit, 10);
        assert_eq!(WorkflowListQuery::from(args), WorkflowListQuery::default());
    }

    #[test]
    fn create_workflow_defaults_inactive() {
        let args: CreateWorkflowArgs = serde_json::from_value(json!({
            "name": "New",
            "nodes": [],
            "connections": {}
        }))
        .expect("valid payload");
        assert!(!NewWorkflow::from(args).active);
    }

    #[test]
    fn update_splits_identifier_from_fields() {
        let args: UpdateWorkflowArgs = serde_json::from_value(json!({
            "workflowId": "wf-1",
            "name": "Renamed",
            "tags": ["ops"]
        }))
        .expect("valid payload");

        let (id, update) = args.into_parts();

        assert_eq!(id, "wf-1");
        assert_eq!(serde_json::to_value(update).expect("serializable"), json!({ "name": "Renamed", "tags": ["ops"] }));
    }

    #[test]
    fn identifier_check_rejects_blank_and_dot_segments() {
        for bad in ["", "  ", ".", ".."] {
            let args = WorkflowIdArgs { workflow_id: bad.into() };
            assert!(args.check().is_err(), "{bad:?} should be rejected");
        }
        assert!(WorkflowIdArgs { workflow_id: "abc".into() }.check().is_ok());
    }

    #[test]
    fn wrong_primitive_type_is_rejected() {
        let error = serde_json::from_value::<ListWorkflowsArgs>(json!({ "active": "yes" })).unwrap_err();
        assert!(error.to_string().contains("invalid type"));
    }
}
