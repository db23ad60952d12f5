//! Local workflow search over a fetched listing page.

use serde_json::Value;

/// Keep the workflows whose name or any tag contains `query`, ignoring case.
///
/// Order is preserved. Tags may be bare names or `{ id, name }` records.
pub fn filter_workflows(workflows: Vec<Value>, query: &str) -> Vec<Value> {
    let needle = query.to_lowercase();
    workflows
        .into_iter()
        .filter(|workflow| name_matches(workflow, &needle) || tag_matches(workflow, &needle))
        .collect()
}

fn name_matches(workflow: &Value, needle: &str) -> bool {
    workflow
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| name.to_lowercase().contains(needle))
}

fn tag_matches(workflow: &Value, needle: &str) -> bool {
    let Some(tags) = workflow.get("tags").and_then(Value::as_array) else {
        return false;
    };
    tags.iter()
        .filter_map(|tag| tag.as_str().or_else(|| tag.get("name").and_then(Value::as_str)))
        .any(|tag| tag.to_lowercase().contains(needle))
}
