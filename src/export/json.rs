//! Node-link JSON writer.
//!
//! Layout follows the common node-link convention:
//! `{"directed": true, "multigraph": true, "graph": {}, "nodes": [...], "links": [...]}`.
//! Attributes live in a nested `attributes` object on each node and link, so
//! a context entry named `source`, `target`, `key` or `id` survives export.

use super::{AttrValue, ExportAttributes, ExportError, ExportGraph};
use serde_json::{json, Map, Value};
use std::io::Write;

/// Node-link JSON format handler.
pub struct NodeLinkJson;

impl NodeLinkJson {
    /// Build the JSON document for an exported graph.
    pub fn to_value(graph: &ExportGraph) -> Value {
        let nodes: Vec<Value> = graph
            .nodes
            .iter()
            .map(|node| {
                json!({
                    "id": node.id,
                    "attributes": attribute_map(&node.attributes),
                })
            })
            .collect();

        let links: Vec<Value> = graph
            .edges
            .iter()
            .map(|edge| {
                json!({
                    "source": edge.source,
                    "target": edge.target,
                    "key": edge.key,
                    "attributes": attribute_map(&edge.attributes),
                })
            })
            .collect();

        json!({
            "directed": true,
            "multigraph": true,
            "graph": {},
            "nodes": nodes,
            "links": links,
        })
    }

    /// Write an exported graph as pretty-printed JSON.
    pub fn write<W: Write>(graph: &ExportGraph, mut writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut writer, &Self::to_value(graph))?;
        writeln!(writer)?;
        Ok(())
    }
}

fn attribute_map(attributes: &ExportAttributes) -> Map<String, Value> {
    attributes
        .iter()
        .map(|(k, v)| {
            let value = match v {
                AttrValue::Text(s) => Value::String(s.clone()),
                AttrValue::Number(n) => json!(n),
            };
            (k.clone(), value)
        })
        .collect()
}
