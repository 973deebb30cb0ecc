//! TemporalGraph: the node/edge store with upsert semantics

use super::edge::{EdgeKey, Relationship};
use super::node::{Attributes, Node, NodeId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Increment applied by [`TemporalGraph::upsert_edge`] on a repeat observation
pub const DEFAULT_WEIGHT_DELTA: f64 = 1.0;

/// All nodes and relationships observed during one run.
///
/// Nodes are keyed by their canonical identifier and iterate in identifier
/// order. Relationships are keyed by [`EdgeKey`] and iterate in insertion
/// order. Every relationship endpoint is always present as a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemporalGraph {
    nodes: BTreeMap<NodeId, Node>,
    edges: Vec<Relationship>,
    #[serde(skip)]
    index: HashMap<EdgeKey, usize>,
}

impl TemporalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the node if absent, then overwrite-merge `attributes` into it.
    pub fn upsert_node(&mut self, id: impl Into<NodeId>, attributes: &Attributes) {
        let id = id.into();
        self.nodes
            .entry(id.clone())
            .or_insert_with(|| Node::new(id))
            .merge_attributes(attributes);
    }

    /// Insert `relationship`, or touch the existing one with the same key
    /// using the default weight delta.
    pub fn upsert_edge(&mut self, relationship: Relationship) {
        self.upsert_edge_with_delta(relationship, DEFAULT_WEIGHT_DELTA);
    }

    /// Insert `relationship`, or touch the existing one with the same key.
    ///
    /// On touch the stored window widens to cover the incoming one, weight
    /// grows by `delta` (negative or non-finite deltas count as 0.0), and the
    /// incoming context overwrites same-named keys. Missing endpoint nodes are
    /// created with no attributes.
    pub fn upsert_edge_with_delta(&mut self, relationship: Relationship, delta: f64) {
        self.ensure_node(relationship.source());
        self.ensure_node(relationship.target());

        match self.index.get(relationship.key()) {
            Some(&idx) => self.edges[idx].touch(&relationship, delta),
            None => {
                self.index.insert(relationship.key().clone(), self.edges.len());
                self.edges.push(relationship);
            }
        }
    }

    fn ensure_node(&mut self, id: &NodeId) {
        if !self.nodes.contains_key(id) {
            self.nodes.insert(id.clone(), Node::new(id.clone()));
        }
    }

    /// All relationships, in insertion order.
    ///
    /// Callers that need a ranking must sort explicitly.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.edges.iter()
    }

    /// Every relationship where `node` is the source or the target.
    ///
    /// A self-loop is returned once.
    pub fn neighborhood(&self, node: &str) -> Vec<&Relationship> {
        self.edges.iter().filter(|rel| rel.touches_node(node)).collect()
    }

    /// Get a node by identifier
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a relationship by its composite key
    pub fn relationship(&self, key: &EdgeKey) -> Option<&Relationship> {
        self.index.get(key).map(|&idx| &self.edges[idx])
    }

    /// All nodes, ordered by identifier
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when nothing has been upserted yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn observation(source: &str, target: &str, kind: &str, day: u32) -> Relationship {
        Relationship::observed(EdgeKey::new(source, target, kind), at(day))
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn upsert_node_merges_attributes_last_write_wins() {
        let mut graph = TemporalGraph::new();
        graph.upsert_node("payments", &attrs(&[("type", "service.deployed"), ("tier", "1")]));
        graph.upsert_node("payments", &attrs(&[("type", "service.scaled")]));

        let node = graph.node("payments").unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(node.attributes, attrs(&[("type", "service.scaled"), ("tier", "1")]));
    }

    #[test]
    fn upsert_edge_same_key_collapses_to_one_edge() {
        let mut graph = TemporalGraph::new();
        graph.upsert_edge(observation("atlas", "payments", "service.deployed", 1));
        graph.upsert_edge(observation("atlas", "payments", "service.deployed", 1));

        assert_eq!(graph.edge_count(), 1);
        let rel = graph.relationships().next().unwrap();
        assert_eq!(rel.weight(), 2.0);
        assert_eq!(rel.first_observed_at(), at(1));
        assert_eq!(rel.last_observed_at(), at(1));
    }

    #[test]
    fn upsert_edge_widens_window_regardless_of_arrival_order() {
        let mut graph = TemporalGraph::new();
        for day in [2, 3, 1] {
            graph.upsert_edge(observation("atlas", "payments", "service.deployed", day));
        }

        let key = EdgeKey::new("atlas", "payments", "service.deployed");
        let rel = graph.relationship(&key).unwrap();
        assert_eq!(rel.first_observed_at(), at(1));
        assert_eq!(rel.last_observed_at(), at(3));
        assert_eq!(rel.weight(), 3.0);
    }

    #[test]
    fn upsert_edge_with_delta_uses_caller_increment() {
        let mut graph = TemporalGraph::new();
        graph.upsert_edge_with_delta(observation("a", "b", "t", 1), 0.5);
        graph.upsert_edge_with_delta(observation("a", "b", "t", 2), 0.5);
        assert_eq!(graph.relationships().next().unwrap().weight(), 1.5);
    }

    #[test]
    fn different_types_between_same_pair_are_distinct_edges() {
        let mut graph = TemporalGraph::new();
        graph.upsert_edge(observation("atlas", "payments", "service.deployed", 1));
        graph.upsert_edge(observation("atlas", "payments", "service.scaled", 1));
        graph.upsert_edge(observation("payments", "atlas", "service.deployed", 1));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn upsert_edge_creates_missing_endpoints() {
        let mut graph = TemporalGraph::new();
        graph.upsert_edge(observation("atlas", "payments", "service.deployed", 1));

        assert_eq!(graph.node_count(), 2);
        assert!(graph.node("atlas").unwrap().attributes.is_empty());
        assert!(graph.node("payments").is_some());
    }

    #[test]
    fn relationships_iterate_in_insertion_order() {
        let mut graph = TemporalGraph::new();
        graph.upsert_edge(observation("c", "d", "t", 1));
        graph.upsert_edge(observation("a", "b", "t", 1));
        graph.upsert_edge(observation("c", "d", "t", 2));

        let sources: Vec<_> = graph.relationships().map(|r| r.source().as_str()).collect();
        assert_eq!(sources, vec!["c", "a"]);
    }

    #[test]
    fn neighborhood_includes_both_directions_only() {
        let mut graph = TemporalGraph::new();
        graph.upsert_edge(observation("atlas", "payments", "service.deployed", 1));
        graph.upsert_edge(observation("payments", "ledger", "calls", 1));
        graph.upsert_edge(observation("apollo", "ledger", "calls", 1));

        let hood = graph.neighborhood("payments");
        assert_eq!(hood.len(), 2);
        assert!(hood.iter().all(|r| r.touches_node("payments")));
        assert!(graph.neighborhood("nobody").is_empty());
    }

    #[test]
    fn neighborhood_returns_self_loop_once() {
        let mut graph = TemporalGraph::new();
        graph.upsert_edge(observation("atlas", "atlas", "service.restarted", 1));
        graph.upsert_edge(observation("atlas", "payments", "service.deployed", 1));

        let hood = graph.neighborhood("atlas");
        assert_eq!(hood.len(), 2);
        let loops = hood.iter().filter(|r| r.source() == r.target()).count();
        assert_eq!(loops, 1);
    }

    #[test]
    fn empty_graph_reports_empty() {
        let graph = TemporalGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.relationships().count(), 0);
    }
}
