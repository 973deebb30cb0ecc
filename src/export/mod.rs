//! Export of a temporal graph to external graph-exchange formats
//!
//! [`ExportGraph`] is the format-neutral attribute mapping: one entry per node
//! and per relationship, with every attribute an exchange file needs. The
//! writers in [`graphml`] and [`json`] only serialize that mapping.

pub mod graphml;
pub mod json;

use crate::graph::{Relationship, TemporalGraph};
use chrono::SecondsFormat;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub use graphml::GraphMl;
pub use json::NodeLinkJson;

/// Edge attribute holding the accumulated weight
pub const WEIGHT: &str = "weight";
/// Edge attribute holding the start of the observed window
pub const FIRST_OBSERVED_AT: &str = "first_observed_at";
/// Edge attribute holding the end of the observed window
pub const LAST_OBSERVED_AT: &str = "last_observed_at";
/// Edge attribute holding the relationship type
pub const RELATIONSHIP_TYPE: &str = "relationship_type";

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supported exchange formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    GraphMl,
    Json,
}

impl ExportFormat {
    /// Pick a format from a file extension: `.json` is node-link JSON,
    /// anything else is GraphML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::GraphMl,
        }
    }
}

/// A typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
}

impl AttrValue {
    /// GraphML `attr.type` for this value
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "string",
            AttrValue::Number(_) => "double",
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{}", s),
            AttrValue::Number(n) => write!(f, "{:?}", n),
        }
    }
}

pub type ExportAttributes = BTreeMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportNode {
    pub id: String,
    pub attributes: ExportAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportEdge {
    pub source: String,
    pub target: String,
    /// The relationship type; distinguishes parallel edges
    pub key: String,
    pub attributes: ExportAttributes,
}

/// Complete attribute mapping of a graph, ready for serialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportGraph {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl ExportGraph {
    pub fn from_graph(graph: &TemporalGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| ExportNode {
                id: node.id.to_string(),
                attributes: node
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), AttrValue::Text(v.clone())))
                    .collect(),
            })
            .collect();

        let edges = graph.relationships().map(export_edge).collect();

        Self { nodes, edges }
    }
}

/// Context entries first, then the reserved attributes, so a context key
/// never shadows `weight` or the window bounds.
fn export_edge(rel: &Relationship) -> ExportEdge {
    let mut attributes: ExportAttributes = rel
        .context()
        .iter()
        .map(|(k, v)| (k.clone(), AttrValue::Text(v.clone())))
        .collect();

    attributes.insert(WEIGHT.to_string(), AttrValue::Number(rel.weight()));
    attributes.insert(
        FIRST_OBSERVED_AT.to_string(),
        AttrValue::Text(rel.first_observed_at().to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    );
    attributes.insert(
        LAST_OBSERVED_AT.to_string(),
        AttrValue::Text(rel.last_observed_at().to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    );
    attributes.insert(
        RELATIONSHIP_TYPE.to_string(),
        AttrValue::Text(rel.relationship_type().to_string()),
    );

    ExportEdge {
        source: rel.source().to_string(),
        target: rel.target().to_string(),
        key: rel.relationship_type().to_string(),
        attributes,
    }
}

/// Serialize `graph` to `writer` in the given format.
pub fn write_graph<W: Write>(
    graph: &TemporalGraph,
    writer: W,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let exported = ExportGraph::from_graph(graph);
    match format {
        ExportFormat::GraphMl => GraphMl::write(&exported, writer),
        ExportFormat::Json => NodeLinkJson::write(&exported, writer),
    }
}

/// Write `graph` to a file at `destination`.
///
/// The graph is only read; a failed export leaves it untouched.
pub fn export(
    graph: &TemporalGraph,
    destination: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let file = File::create(destination)?;
    let mut writer = BufWriter::new(file);
    write_graph(graph, &mut writer, format)?;
    writer.flush()?;

    info!(
        path = %destination.display(),
        ?format,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph exported"
    );
    Ok(())
}
