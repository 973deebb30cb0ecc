//! GraphML writer.
//!
//! Emits a directed graph with one `<key>` declaration per attribute name and
//! domain. Parallel edges are kept. Edge ids are `e0`, `e1`, ... in edge
//! order; the relationship type travels as the `relationship_type` data key.
//!
//! Reference: <http://graphml.graphdrawing.org/specification.html>

use super::{ExportAttributes, ExportError, ExportGraph};
use std::collections::BTreeMap;
use std::io::Write;

const HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" "#,
    r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
    r#"xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns "#,
    r#"http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#,
);

/// GraphML format handler.
pub struct GraphMl;

/// Declared `<key>` for one attribute name in one domain
struct KeyDecl {
    id: String,
    type_name: &'static str,
}

type KeyTable = BTreeMap<String, KeyDecl>;

impl GraphMl {
    /// Write an exported graph as GraphML.
    pub fn write<W: Write>(graph: &ExportGraph, mut writer: W) -> Result<(), ExportError> {
        let mut next_id = 0usize;
        let node_keys = declare_keys(graph.nodes.iter().map(|n| &n.attributes), &mut next_id);
        let edge_keys = declare_keys(graph.edges.iter().map(|e| &e.attributes), &mut next_id);

        writeln!(writer, "{}", HEADER)?;
        write_key_decls(&mut writer, "node", &node_keys)?;
        write_key_decls(&mut writer, "edge", &edge_keys)?;

        writeln!(writer, "  <graph edgedefault=\"directed\">")?;
        for node in &graph.nodes {
            writeln!(writer, "    <node id=\"{}\">", escape(&node.id))?;
            write_data(&mut writer, &node.attributes, &node_keys)?;
            writeln!(writer, "    </node>")?;
        }
        for (index, edge) in graph.edges.iter().enumerate() {
            writeln!(
                writer,
                "    <edge id=\"e{}\" source=\"{}\" target=\"{}\">",
                index,
                escape(&edge.source),
                escape(&edge.target)
            )?;
            write_data(&mut writer, &edge.attributes, &edge_keys)?;
            writeln!(writer, "    </edge>")?;
        }
        writeln!(writer, "  </graph>")?;
        writeln!(writer, "</graphml>")?;
        Ok(())
    }

    /// Convert to string.
    pub fn to_string(graph: &ExportGraph) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        Self::write(graph, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).to_string())
    }
}

/// Assign `d<n>` ids to every attribute name, in name order.
fn declare_keys<'a>(
    attribute_sets: impl Iterator<Item = &'a ExportAttributes>,
    next_id: &mut usize,
) -> KeyTable {
    let mut types: BTreeMap<&str, &'static str> = BTreeMap::new();
    for attributes in attribute_sets {
        for (name, value) in attributes {
            types.entry(name.as_str()).or_insert_with(|| value.type_name());
        }
    }

    types
        .into_iter()
        .map(|(name, type_name)| {
            let id = format!("d{}", *next_id);
            *next_id += 1;
            (name.to_string(), KeyDecl { id, type_name })
        })
        .collect()
}

fn write_key_decls<W: Write>(
    writer: &mut W,
    domain: &str,
    keys: &KeyTable,
) -> Result<(), ExportError> {
    for (name, decl) in keys {
        writeln!(
            writer,
            "  <key id=\"{}\" for=\"{}\" attr.name=\"{}\" attr.type=\"{}\"/>",
            decl.id,
            domain,
            escape(name),
            decl.type_name
        )?;
    }
    Ok(())
}

fn write_data<W: Write>(
    writer: &mut W,
    attributes: &ExportAttributes,
    keys: &KeyTable,
) -> Result<(), ExportError> {
    for (name, value) in attributes {
        if let Some(decl) = keys.get(name) {
            writeln!(
                writer,
                "      <data key=\"{}\">{}</data>",
                decl.id,
                escape(&value.to_string())
            )?;
        }
    }
    Ok(())
}

/// Escape text for use in XML content and attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
