//! Serialization tests for graph types

use serde_json::{json, Value};

/// Fixture: a node as it appears in a serialized graph
fn node_fixture() -> Value {
    json!({
        "id": "payments",
        "attributes": {
            "type": "service.deployed"
        }
    })
}

#[cfg(test)]
mod serialization_tests {
    use super::*;
    use crate::graph::{Attributes, EdgeKey, Node, NodeId, Relationship, TemporalGraph};
    use chrono::{TimeZone, Utc};

    #[test]
    fn node_id_serializes_as_string() {
        let id = NodeId::from_string("atlas");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"atlas\"");
    }

    #[test]
    fn node_id_deserializes_from_string() {
        let id: NodeId = serde_json::from_str("\"atlas\"").unwrap();
        assert_eq!(id.as_str(), "atlas");
    }

    #[test]
    fn can_deserialize_node_fixture() {
        let result: Result<Node, _> = serde_json::from_value(node_fixture());
        assert!(result.is_ok(), "Failed to deserialize node fixture: {:?}", result.err());

        let node = result.unwrap();
        assert_eq!(node.id.as_str(), "payments");
        assert_eq!(node.attributes.get("type").map(String::as_str), Some("service.deployed"));
    }

    #[test]
    fn node_without_attributes_deserializes_empty() {
        let node: Node = serde_json::from_value(json!({"id": "atlas"})).unwrap();
        assert!(node.attributes.is_empty());
    }

    #[test]
    fn node_roundtrip() {
        let node = Node::new("atlas").with_attribute("type", "actor");
        let json = serde_json::to_string(&node).unwrap();
        let node2: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, node2);
    }

    #[test]
    fn serialized_relationship_has_flat_structure() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rel = Relationship::observed(EdgeKey::new("atlas", "payments", "service.deployed"), at)
            .with_context(Attributes::from([("run".to_string(), "3".to_string())]));

        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["source"], "atlas");
        assert_eq!(json["target"], "payments");
        assert_eq!(json["relationship_type"], "service.deployed");
        assert_eq!(json["first_observed_at"], "2024-01-01T00:00:00Z");
        assert_eq!(json["last_observed_at"], "2024-01-01T00:00:00Z");
        assert_eq!(json["weight"], 1.0);
        assert_eq!(json["context"]["run"], "3");
    }

    #[test]
    fn serialized_graph_omits_key_index() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut graph = TemporalGraph::new();
        graph.upsert_edge(Relationship::observed(EdgeKey::new("atlas", "payments", "t"), at));

        let json = serde_json::to_value(&graph).unwrap();
        assert!(json["nodes"].is_object());
        assert_eq!(json["nodes"].as_object().unwrap().len(), 2);
        assert_eq!(json["edges"].as_array().unwrap().len(), 1);
        assert!(json.get("index").is_none());
    }
}
