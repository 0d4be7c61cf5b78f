//! Plain structured records for nodes, their legal entity, and capabilities.
//!
//! Field names serialize as the collaborator layer expects (`legalEntity`,
//! `registryId`, `type`), so the same structs back both the JSON output of the
//! CLI and the JSON payload accepted by an administrative replace.

use crate::node::identity::{NodeId, Uri};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A named service function a node exposes, with its own endpoint and version.
pub struct Capability {
    #[serde(rename = "type")]
    pub capability_type: String,
    pub endpoint: Uri,
    pub version: String,
}

impl Capability {
    pub fn new(capability_type: impl Into<String>, endpoint: Uri, version: impl Into<String>) -> Self {
        Self {
            capability_type: capability_type.into(),
            endpoint,
            version: version.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Organization operating a node.
///
/// An incomplete legal-entity block still yields a value: `name` stays empty
/// and `registry_id` stays unset.
pub struct LegalEntity {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<Uri>,
}

impl LegalEntity {
    pub fn new(name: impl Into<String>, registry_id: Uri) -> Self {
        Self {
            name: name.into(),
            registry_id: Some(registry_id),
        }
    }

    /// True when both the name and the registry id were supplied.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && self.registry_id.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A registered federated service entry.
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub logo: Uri,
    pub pid: String,
    #[serde(default)]
    pub legal_entity: LegalEntity,
    pub endpoint: Uri,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl Node {
    /// Capability types offered by this node, trimmed, in declaration order.
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities
            .iter()
            .map(|cap| cap.capability_type.trim())
            .collect()
    }

    /// Exact, case-sensitive match against the trimmed capability types.
    pub fn offers(&self, capability: &str) -> bool {
        self.capability_names().contains(&capability)
    }

    pub fn summary(&self) -> NodeSummary {
        NodeSummary {
            endpoint: self.endpoint.clone(),
            capabilities: self.capabilities.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Basic node info: where to reach the node and what it offers.
pub struct NodeSummary {
    pub endpoint: Uri,
    pub capabilities: Vec<Capability>,
}

impl NodeSummary {
    /// Render the summary as a labelled JSON array:
    /// `["node endpoint:", <endpoint>, "capabilities:", <capabilities JSON>]`.
    ///
    /// The capability list is embedded as a JSON string, not a nested array.
    pub fn render(&self) -> serde_json::Result<String> {
        let capabilities = serde_json::to_string(&self.capabilities)?;
        serde_json::to_string(&[
            "node endpoint:",
            self.endpoint.as_str(),
            "capabilities:",
            capabilities.as_str(),
        ])
    }
}

/// Read a JSON array of nodes, as posted to an administrative replace.
pub fn load_nodes_json(path: &Path) -> Result<Vec<Node>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let nodes: Vec<Node> = serde_json::from_str(&data)
        .with_context(|| format!("parsing node list {}", path.display()))?;
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn uri(raw: &str) -> Uri {
        Uri::parse(raw).unwrap()
    }

    fn sample_node() -> Node {
        Node {
            id: NodeId::from("1"),
            name: "Node One".to_string(),
            logo: uri("http://example.com/logo1"),
            pid: "PID1".to_string(),
            legal_entity: LegalEntity::new("Example Entity", uri("http://example.com/ror")),
            endpoint: uri("http://example.com/node1"),
            capabilities: vec![
                Capability::new(" Resource Catalogue ", uri("http://example.com/cap1"), "v1"),
                Capability::new("Monitoring", uri("http://example.com/cap2"), "v2"),
            ],
        }
    }

    #[test]
    fn node_serializes_with_collaborator_field_names() {
        let value = serde_json::to_value(sample_node()).unwrap();
        assert_eq!(value["id"], json!("1"));
        assert_eq!(value["logo"], json!("http://example.com/logo1"));
        assert_eq!(value["legalEntity"]["name"], json!("Example Entity"));
        assert_eq!(
            value["legalEntity"]["registryId"],
            json!("http://example.com/ror")
        );
        assert_eq!(value["capabilities"][1]["type"], json!("Monitoring"));
        assert_eq!(value["capabilities"][1]["version"], json!("v2"));
    }

    #[test]
    fn incomplete_legal_entity_omits_registry_id() {
        let entity = LegalEntity::default();
        assert!(!entity.is_complete());
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value, json!({"name": ""}));
    }

    #[test]
    fn capability_names_are_trimmed() {
        let node = sample_node();
        assert_eq!(node.capability_names(), vec!["Resource Catalogue", "Monitoring"]);
        assert!(node.offers("Resource Catalogue"));
        assert!(!node.offers("resource catalogue"));
    }

    #[test]
    fn summary_render_embeds_endpoint_and_capabilities() {
        let rendered = sample_node().summary().render().unwrap();
        let parsed: Vec<String> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0], "node endpoint:");
        assert_eq!(parsed[1], "http://example.com/node1");
        assert_eq!(parsed[2], "capabilities:");
        let caps: Vec<Capability> = serde_json::from_str(&parsed[3]).unwrap();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[1].capability_type, "Monitoring");
    }

    #[test]
    fn load_nodes_json_reads_replace_payload() {
        let payload = json!([{
            "id": "3",
            "name": "Node Three",
            "logo": "http://example.com/logo3",
            "pid": "PID3",
            "legalEntity": {"name": "Another Entity", "registryId": "http://example.com/ror3"},
            "endpoint": "http://example.com/node3",
            "capabilities": []
        }]);
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{payload}").unwrap();

        let nodes = load_nodes_json(file.path()).expect("payload parses");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, NodeId::from("3"));
        assert!(nodes[0].legal_entity.is_complete());
        assert!(nodes[0].capabilities.is_empty());
    }

    #[test]
    fn load_nodes_json_keeps_uri_text() {
        let payload = json!([{
            "id": "4",
            "name": "Node Four",
            "logo": "/static/logo.png",
            "pid": "PID4",
            "endpoint": "HTTP://Example.COM"
        }]);
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{payload}").unwrap();

        let nodes = load_nodes_json(file.path()).expect("payload parses");
        let value = serde_json::to_value(&nodes[0]).unwrap();
        assert_eq!(value["logo"], json!("/static/logo.png"));
        assert_eq!(value["endpoint"], json!("HTTP://Example.COM"));
    }

    #[test]
    fn load_nodes_json_rejects_bad_uris() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"1","name":"n","logo":"not a url","pid":"p","endpoint":"http://x"}}]"#
        )
        .unwrap();
        assert!(load_nodes_json(file.path()).is_err());
    }
}
