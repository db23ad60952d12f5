//! Tool catalog, argument contracts, and dispatch.

mod args;
mod call;
mod catalog;
mod dispatcher;

pub use args::{
    CreateWorkflowArgs, ExecuteWorkflowArgs, ExecutionIdArgs, GetExecutionsArgs, ListWorkflowsArgs, NoArgs, SearchArgs, TagIdArgs,
    TagNameArgs, ToolArgs, UpdateTagArgs, UpdateWorkflowArgs, WorkflowIdArgs,
};
pub use call::ToolCall;
pub use catalog::{TOOL_SPECS, ToolAccess, ToolSpec, find_tool, list_tools};
pub use dispatcher::Dispatcher;
