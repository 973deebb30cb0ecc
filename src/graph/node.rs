//! Node representation in the temporal graph

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form string attributes carried by nodes, edges and events
pub type Attributes = BTreeMap<String, String>;

/// Identifier of a node: the canonical entity string
///
/// Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from an entity string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A node in the temporal graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Canonical entity identifier
    pub id: NodeId,
    /// Accumulated attributes (last write wins per key)
    #[serde(default)]
    pub attributes: Attributes,
}

impl Node {
    /// Create a node with no attributes
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
        }
    }

    /// Add an attribute to the node
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Overwrite-merge attributes into this node
    pub fn merge_attributes(&mut self, attributes: &Attributes) {
        for (k, v) in attributes {
            self.attributes.insert(k.clone(), v.clone());
        }
    }
}
