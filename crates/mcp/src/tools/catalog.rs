//! The fixed, ordered tool catalog.
//!
//! Every tool is one [`ToolSpec`] row: its name, description, access class,
//! input schema and argument parser. Listing and dispatch both read this
//! table, so a tool cannot be advertised without being callable.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde_json::Value;

use crate::tools::args::{
    CreateWorkflowArgs, ExecuteWorkflowArgs, ExecutionIdArgs, GetExecutionsArgs, ListWorkflowsArgs, NoArgs, SearchArgs, TagIdArgs,
    TagNameArgs, ToolArgs, UpdateTagArgs, UpdateWorkflowArgs, WorkflowIdArgs,
};
use crate::tools::call::ToolCall;

/// How a tool affects the n8n instance, derived from the HTTP verb it issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAccess {
    /// GET requests only.
    ReadOnly,
    /// POST or PATCH requests.
    Write,
    /// DELETE requests.
    Destructive,
}

impl ToolAccess {
    fn annotations(self) -> ToolAnnotations {
        let annotations = ToolAnnotations::new().open_world(true);
        match self {
            ToolAccess::ReadOnly => annotations.read_only(true).idempotent(true),
            ToolAccess::Write => annotations.read_only(false).destructive(false).idempotent(false),
            ToolAccess::Destructive => annotations.read_only(false).destructive(true).idempotent(true),
        }
    }
}

/// One catalog row.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub access: ToolAccess,
    input_schema: fn() -> JsonObject,
    parse: fn(Value) -> Result<ToolCall, String>,
}

impl ToolSpec {
    /// JSON Schema of the accepted arguments.
    pub fn input_schema(&self) -> JsonObject {
        (self.input_schema)()
    }

    /// Validate raw arguments into a typed call.
    pub fn parse(&self, arguments: Value) -> Result<ToolCall, String> {
        (self.parse)(arguments)
    }

    /// Render the row as an MCP tool descriptor.
    pub fn to_tool(&self) -> Tool {
        let mut tool = Tool::new(self.name, self.description, Arc::new(self.input_schema()));
        tool.annotations = Some(self.access.annotations());
        tool
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

fn schema_of<T: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(T);
    let Ok(Value::Object(mut object)) = serde_json::to_value(schema) else {
        return JsonObject::new();
    };
    object.remove("$schema");
    object.remove("title");
    object.remove("description");
    object
}

fn parse_args<T: ToolArgs>(arguments: Value) -> Result<T, String> {
    let args: T = serde_json::from_value(arguments).map_err(|error| error.to_string())?;
    args.check()?;
    Ok(args)
}

pub static TOOL_SPECS: [ToolSpec; 19] = [
    ToolSpec {
        name: "list_workflows",
        description: "List all workflows in n8n",
        access: ToolAccess::ReadOnly,
        input_schema: schema_of::<ListWorkflowsArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::ListWorkflows),
    },
    ToolSpec {
        name: "get_workflow",
        description: "Get details of a specific workflow",
        access: ToolAccess::ReadOnly,
        input_schema: schema_of::<WorkflowIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::GetWorkflow),
    },
    ToolSpec {
        name: "create_workflow",
        description: "Create a new workflow",
        access: ToolAccess::Write,
        input_schema: schema_of::<CreateWorkflowArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::CreateWorkflow),
    },
    ToolSpec {
        name: "update_workflow",
        description: "Update an existing workflow",
        access: ToolAccess::Write,
        input_schema: schema_of::<UpdateWorkflowArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::UpdateWorkflow),
    },
    ToolSpec {
        name: "delete_workflow",
        description: "Delete a workflow",
        access: ToolAccess::Destructive,
        input_schema: schema_of::<WorkflowIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::DeleteWorkflow),
    },
    ToolSpec {
        name: "activate_workflow",
        description: "Activate a workflow",
        access: ToolAccess::Write,
        input_schema: schema_of::<WorkflowIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::ActivateWorkflow),
    },
    ToolSpec {
        name: "deactivate_workflow",
        description: "Deactivate a workflow",
        access: ToolAccess::Write,
        input_schema: schema_of::<WorkflowIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::DeactivateWorkflow),
    },
    ToolSpec {
        name: "execute_workflow",
        description: "Execute a workflow manually",
        access: ToolAccess::Write,
        input_schema: schema_of::<ExecuteWorkflowArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::ExecuteWorkflow),
    },
    ToolSpec {
        name: "get_executions",
        description: "Get workflow execution history",
        access: ToolAccess::ReadOnly,
        input_schema: schema_of::<GetExecutionsArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::GetExecutions),
    },
    ToolSpec {
        name: "get_execution",
        description: "Get details of a specific execution",
        access: ToolAccess::ReadOnly,
        input_schema: schema_of::<ExecutionIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::GetExecution),
    },
    ToolSpec {
        name: "delete_execution",
        description: "Delete an execution",
        access: ToolAccess::Destructive,
        input_schema: schema_of::<ExecutionIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::DeleteExecution),
    },
    ToolSpec {
        name: "retry_execution",
        description: "Retry a failed execution",
        access: ToolAccess::Write,
        input_schema: schema_of::<ExecutionIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::RetryExecution),
    },
    ToolSpec {
        name: "get_tags",
        description: "Get all workflow tags",
        access: ToolAccess::ReadOnly,
        input_schema: schema_of::<NoArgs>,
        parse: |arguments| parse_args::<NoArgs>(arguments).map(|_| ToolCall::GetTags),
    },
    ToolSpec {
        name: "create_tag",
        description: "Create a new tag",
        access: ToolAccess::Write,
        input_schema: schema_of::<TagNameArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::CreateTag),
    },
    ToolSpec {
        name: "update_tag",
        description: "Update a tag",
        access: ToolAccess::Write,
        input_schema: schema_of::<UpdateTagArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::UpdateTag),
    },
    ToolSpec {
        name: "delete_tag",
        description: "Delete a tag",
        access: ToolAccess::Destructive,
        input_schema: schema_of::<TagIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::DeleteTag),
    },
    ToolSpec {
        name: "get_credentials",
        description: "Get all credentials (without sensitive data)",
        access: ToolAccess::ReadOnly,
        input_schema: schema_of::<NoArgs>,
        parse: |arguments| parse_args::<NoArgs>(arguments).map(|_| ToolCall::GetCredentials),
    },
    ToolSpec {
        name: "search_workflows",
        description: "Search workflows by name or tags",
        access: ToolAccess::ReadOnly,
        input_schema: schema_of::<SearchArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::SearchWorkflows),
    },
    ToolSpec {
        name: "get_workflow_webhooks",
        description: "Get webhook URLs for a workflow",
        access: ToolAccess::ReadOnly,
        input_schema: schema_of::<WorkflowIdArgs>,
        parse: |arguments| parse_args(arguments).map(ToolCall::GetWorkflowWebhooks),
    },
];

/// Look up a catalog row by exact tool name.
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOL_SPECS.iter().find(|spec| spec.name == name)
}

/// All tools in catalog order, ready for a `tools/list` reply.
pub fn list_tools() -> Vec<Tool> {
    TOOL_SPECS.iter().map(ToolSpec::to_tool).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    const EXPECTED_ORDER: [&str; 19] = [
        "list_workflows",
        "get_workflow",
        "create_workflow",
        "update_workflow",
        "delete_workflow",
        "activate_workflow",
        "deactivate_workflow",
        "execute_workflow",
        "get_executions",
        "get_execution",
        "delete_execution",
        "retry_execution",
        "get_tags",
        "create_tag",
        "update_tag",
        "delete_tag",
        "get_credentials",
        "search_workflows",
        "get_workflow_webhooks",
    ];

    fn required_of(name: &str) -> Vec<String> {
        let spec = find_tool(name).expect("tool exists");
        let schema = spec.input_schema();
        let mut required: Vec<String> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();
        required.sort();
        required
    }

    #[test]
    fn catalog_lists_nineteen_tools_in_order() {
        let names: Vec<_> = list_tools().into_iter().map(|tool| tool.name.to_string()).collect();
        assert_eq!(names, EXPECTED_ORDER);
    }

    #[test]
    fn tool_names_are_unique() {
        let unique: HashSet<_> = TOOL_SPECS.iter().map(|spec| spec.name).collect();
        assert_eq!(unique.len(), TOOL_SPECS.len());
    }

    #[test]
    fn every_schema_is_an_object_schema() {
        for spec in &TOOL_SPECS {
            let schema = spec.input_schema();
            assert_eq!(schema.get("type"), Some(&json!("object")), "{} schema", spec.name);
            assert!(!schema.contains_key("$schema"));
            assert!(!schema.contains_key("title"));
        }
    }

    #[test]
    fn required_fields_match_contract() {
        assert!(required_of("list_workflows").is_empty());
        assert_eq!(required_of("get_workflow"), ["workflowId"]);
        assert_eq!(required_of("create_workflow"), ["connections", "name", "nodes"]);
        assert_eq!(required_of("update_workflow"), ["workflowId"]);
        assert_eq!(required_of("execute_workflow"), ["workflowId"]);
        assert!(required_of("get_executions").is_empty());
        assert_eq!(required_of("retry_execution"), ["executionId"]);
        assert!(required_of("get_tags").is_empty());
        assert_eq!(required_of("create_tag"), ["name"]);
        assert_eq!(required_of("update_tag"), ["name", "tagId"]);
        assert_eq!(required_of("delete_tag"), ["tagId"]);
        assert!(required_of("get_credentials").is_empty());
        assert_eq!(required_of("search_workflows"), ["query"]);
        assert_eq!(required_of("get_workflow_webhooks"), ["workflowId"]);
    }

    #[test]
    fn limit_advertises_default_of_ten() {
        let schema = find_tool("list_workflows").expect("tool exists").input_schema();
        assert_eq!(schema["properties"]["limit"]["default"], json!(10));

        let schema = find_tool("get_executions").expect("tool exists").input_schema();
        assert_eq!(schema["properties"]["limit"]["default"], json!(10));
    }

    #[test]
    fn annotations_follow_http_verb() {
        let delete = find_tool("delete_workflow").expect("tool exists").to_tool();
        let annotations = delete.annotations.expect("annotations present");
        assert_eq!(annotations.destructive_hint, Some(true));
        assert_eq!(annotations.read_only_hint, Some(false));

        let list = find_tool("get_tags").expect("tool exists").to_tool();
        assert_eq!(list.annotations.expect("annotations present").read_only_hint, Some(true));
    }

    #[test]
    fn unknown_name_is_not_found() {
        assert!(find_tool("drop_database").is_none());
        assert!(find_tool("List_Workflows").is_none());
    }

    #[test]
    fn parse_reports_missing_field() {
        let error = find_tool("get_workflow").expect("tool exists").parse(json!({})).unwrap_err();
        assert!(error.contains("workflowId"), "{error}");
    }
}
