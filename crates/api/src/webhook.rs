//! Webhook URL resolution from workflow node definitions.

use serde_json::Value;

use crate::model::{WebhookEndpoint, Workflow};

/// Node type identifying an n8n webhook trigger.
pub const WEBHOOK_NODE_TYPE: &str = "n8n-nodes-base.webhook";
const DEFAULT_WEBHOOK_METHOD: &str = "GET";

/// Collect one [`WebhookEndpoint`] per webhook node, in node order.
///
/// The path comes from `parameters.path`, falling back to the node's
/// `webhookId`; the method comes from `parameters.httpMethod`, falling back
/// to `GET`. URLs are `<base_url>/webhook/<path>`.
pub fn webhook_endpoints(workflow: &Workflow, base_url: &str) -> Vec<WebhookEndpoint> {
    workflow
        .nodes
        .iter()
        .filter(|node| node.get("type").and_then(Value::as_str) == Some(WEBHOOK_NODE_TYPE))
        .map(|node| endpoint_for_node(node, base_url))
        .collect()
}

fn endpoint_for_node(node: &Value, base_url: &str) -> WebhookEndpoint {
    let parameters = node.get("parameters");
    let path = non_empty_str(parameters.and_then(|parameters| parameters.get("path")))
        .or_else(|| non_empty_str(node.get("webhookId")))
        .map(|path| path.trim_start_matches('/').to_string());
    let method = non_empty_str(parameters.and_then(|parameters| parameters.get("httpMethod")))
        .unwrap_or(DEFAULT_WEBHOOK_METHOD)
        .to_string();
    let webhook_url = path.as_ref().map(|path| format!("{base_url}/webhook/{path}"));

    WebhookEndpoint {
        node_id: node.get("id").and_then(Value::as_str).map(str::to_owned),
        node_name: node.get("name").and_then(Value::as_str).map(str::to_owned),
        path,
        method,
        webhook_url,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn workflow_with_nodes(nodes: Vec<Value>) -> Workflow {
        Workflow {
            id: "wf-1".into(),
            name: "Hooks".into(),
            active: true,
            created_at: "2024-01-01T00:00:00.000Z".into(),
            updated_at: "2024-01-01T00:00:00.000Z".into(),
            nodes,
            connections: Map::new(),
            settings: None,
            static_data: None,
            tags: None,
        }
    }

    #[test]
    fn path_parameter_with_default_method() {
        let workflow = workflow_with_nodes(vec![json!({
            "id": "n1",
            "name": "Webhook",
            "type": WEBHOOK_NODE_TYPE,
            "parameters": { "path": "foo" }
        })]);

        let endpoints = webhook_endpoints(&workflow, "http://localhost:5678");

        assert_eq!(
            endpoints,
            vec![WebhookEndpoint {
                node_id: Some("n1".into()),
                node_name: Some("Webhook".into()),
                path: Some("foo".into()),
                method: "GET".into(),
                webhook_url: Some("http://localhost:5678/webhook/foo".into()),
            }]
        );
    }

    #[test]
    fn falls_back_to_webhook_id_and_keeps_explicit_method() {
        let workflow = workflow_with_nodes(vec![json!({
            "id": "n2",
            "name": "Inbound",
            "type": WEBHOOK_NODE_TYPE,
            "webhookId": "3f1c",
            "parameters": { "path": "", "httpMethod": "POST" }
        })]);

        let endpoints = webhook_endpoints(&workflow, "https://n8n.example.com");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path.as_deref(), Some("3f1c"));
        assert_eq!(endpoints[0].method, "POST");
        assert_eq!(endpoints[0].webhook_url.as_deref(), Some("https://n8n.example.com/webhook/3f1c"));
    }

    #[test]
    fn ignores_other_node_types_and_preserves_order() {
        let workflow = workflow_with_nodes(vec![
            json!({ "id": "a", "type": WEBHOOK_NODE_TYPE, "parameters": { "path": "first" } }),
            json!({ "id": "b", "type": "n8n-nodes-base.httpRequest", "parameters": { "path": "nope" } }),
            json!({ "id": "c", "type": WEBHOOK_NODE_TYPE, "parameters": { "path": "/second" } }),
        ]);

        let paths: Vec<_> = webhook_endpoints(&workflow, "http://h")
            .into_iter()
            .map(|endpoint| endpoint.path)
            .collect();

        assert_eq!(paths, vec![Some("first".to_string()), Some("second".to_string())]);
    }

    #[test]
    fn node_without_path_has_no_url() {
        let workflow = workflow_with_nodes(vec![json!({ "type": WEBHOOK_NODE_TYPE })]);

        let endpoints = webhook_endpoints(&workflow, "http://h");

        assert_eq!(endpoints[0].path, None);
        assert_eq!(endpoints[0].webhook_url, None);
        assert_eq!(endpoints[0].node_id, None);
    }
}
