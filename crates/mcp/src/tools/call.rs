//! A validated tool invocation and its mapping onto client operations.

use n8n_api::N8nClient;
use serde::Serialize;
use serde_json::Value;

use crate::error::DispatchError;
use crate::tools::args::{
    CreateWorkflowArgs, ExecuteWorkflowArgs, ExecutionIdArgs, GetExecutionsArgs, ListWorkflowsArgs, SearchArgs, TagIdArgs, TagNameArgs,
    UpdateTagArgs, UpdateWorkflowArgs, WorkflowIdArgs,
};

/// One parsed call per catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    ListWorkflows(ListWorkflowsArgs),
    GetWorkflow(WorkflowIdArgs),
    CreateWorkflow(CreateWorkflowArgs),
    UpdateWorkflow(UpdateWorkflowArgs),
    DeleteWorkflow(WorkflowIdArgs),
    ActivateWorkflow(WorkflowIdArgs),
    DeactivateWorkflow(WorkflowIdArgs),
    ExecuteWorkflow(ExecuteWorkflowArgs),
    GetExecutions(GetExecutionsArgs),
    GetExecution(ExecutionIdArgs),
    DeleteExecution(ExecutionIdArgs),
    RetryExecution(ExecutionIdArgs),
    GetTags,
    CreateTag(TagNameArgs),
    UpdateTag(UpdateTagArgs),
    DeleteTag(TagIdArgs),
    GetCredentials,
    SearchWorkflows(SearchArgs),
    GetWorkflowWebhooks(WorkflowIdArgs),
}

impl ToolCall {
    /// Run the call against n8n and return the JSON result.
    ///
    /// Exactly one client operation is issued per call.
    pub async fn execute(self, client: &N8nClient) -> Result<Value, DispatchError> {
        let result = match self {
            ToolCall::ListWorkflows(args) => client.list_workflows(&args.into()).await?,
            ToolCall::GetWorkflow(args) => encode(client.get_workflow(&args.workflow_id).await?)?,
            ToolCall::CreateWorkflow(args) => encode(client.create_workflow(&args.into()).await?)?,
            ToolCall::UpdateWorkflow(args) => {
                let (workflow_id, update) = args.into_parts();
                encode(client.update_workflow(&workflow_id, &update).await?)?
            }
            ToolCall::DeleteWorkflow(args) => encode(client.delete_workflow(&args.workflow_id).await?)?,
            ToolCall::ActivateWorkflow(args) => encode(client.activate_workflow(&args.workflow_id).await?)?,
            ToolCall::DeactivateWorkflow(args) => encode(client.deactivate_workflow(&args.workflow_id).await?)?,
            ToolCall::ExecuteWorkflow(args) => client.execute_workflow(&args.workflow_id, args.data).await?,
            ToolCall::GetExecutions(args) => client.list_executions(&args.into()).await?,
            ToolCall::GetExecution(args) => encode(client.get_execution(&args.execution_id).await?)?,
            ToolCall::DeleteExecution(args) => encode(client.delete_execution(&args.execution_id).await?)?,
            ToolCall::RetryExecution(args) => client.retry_execution(&args.execution_id).await?,
            ToolCall::GetTags => client.list_tags().await?,
            ToolCall::CreateTag(args) => client.create_tag(&args.name).await?,
            ToolCall::UpdateTag(args) => client.update_tag(&args.tag_id, &args.name).await?,
            ToolCall::DeleteTag(args) => encode(client.delete_tag(&args.tag_id).await?)?,
            ToolCall::GetCredentials => client.list_credentials().await?,
            ToolCall::SearchWorkflows(args) => Value::Array(client.search_workflows(&args.query).await?),
            ToolCall::GetWorkflowWebhooks(args) => encode(client.get_workflow_webhooks(&args.workflow_id).await?)?,
        };
        Ok(result)
    }
}

fn encode<T: Serialize>(value: T) -> Result<Value, DispatchError> {
    Ok(serde_json::to_value(value)?)
}
