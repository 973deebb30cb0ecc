//! Projection engine: replays ordered events into a [`TemporalGraph`]
//!
//! Each batch passed to [`ProjectionEngine::ingest`] is sorted by `occurred_at`
//! and appended after everything ingested before it.
//! [`ProjectionEngine::build_graph`] groups the buffer by `(actor, subject,
//! event_type)`, folds each group into one [`Relationship`], and returns a
//! freshly built graph. Building never mutates the buffer, so calling it
//! twice yields two equal graphs.

use crate::event::{Event, RawEvent, ValidationError};
use crate::graph::{Attributes, EdgeKey, Relationship, TemporalGraph, DEFAULT_WEIGHT_DELTA};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Node attribute naming the role an entity was last seen in
pub const NODE_TYPE_ATTRIBUTE: &str = "type";

/// Value of [`NODE_TYPE_ATTRIBUTE`] for actors
pub const ACTOR_NODE_TYPE: &str = "actor";

/// Invalid projection settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("weight delta must be finite and non-negative, got {0}")]
    InvalidWeightDelta(f64),
}

/// Errors that can occur while loading or ingesting event records
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Tunables for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Weight added for every repeat observation of a relationship
    pub weight_delta: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            weight_delta: DEFAULT_WEIGHT_DELTA,
        }
    }
}

impl ProjectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the repeat-observation increment
    pub fn with_weight_delta(mut self, weight_delta: f64) -> Result<Self, ConfigError> {
        if !weight_delta.is_finite() || weight_delta < 0.0 {
            return Err(ConfigError::InvalidWeightDelta(weight_delta));
        }
        self.weight_delta = weight_delta;
        Ok(self)
    }
}

/// Buffers validated events and projects them into a temporal graph
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
    events: Vec<Event>,
}

impl ProjectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Buffered events: batches in arrival order, each sorted by `occurred_at`
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Sort a batch of validated events by `occurred_at` and append it.
    ///
    /// Events with equal timestamps keep their order within the batch. A
    /// later batch always replays after an earlier one, even when its events
    /// are older. No deduplication happens here.
    pub fn ingest(&mut self, events: impl IntoIterator<Item = Event>) {
        let mut batch: Vec<Event> = events.into_iter().collect();
        // stable: ties keep arrival order
        batch.sort_by_key(Event::occurred_at);
        let added = batch.len();
        self.events.extend(batch);
        debug!(
            added,
            buffered = self.events.len(),
            "ingested event batch"
        );
    }

    /// Validate and append a batch of raw records.
    ///
    /// The batch is all-or-nothing: if any record fails validation nothing
    /// is appended and the first failure is returned with its index.
    pub fn ingest_raw(
        &mut self,
        records: impl IntoIterator<Item = RawEvent>,
    ) -> Result<usize, LoadError> {
        let events = validate_all(records)?;
        let count = events.len();
        self.ingest(events);
        Ok(count)
    }

    /// Fold the buffered events into one relationship per composite key.
    ///
    /// Relationships come back in the order their key was first observed.
    /// The first observation of a key weighs 1.0, each repeat adds the
    /// configured weight delta.
    pub fn fold_relationships(&self) -> Vec<Relationship> {
        let mut slots: HashMap<EdgeKey, usize> = HashMap::new();
        let mut folded: Vec<Relationship> = Vec::new();

        for event in &self.events {
            let key = EdgeKey::new(event.actor(), event.subject(), event.event_type());
            let observation = Relationship::observed(key, event.occurred_at())
                .with_context(event.attributes().clone());

            match slots.get(observation.key()) {
                Some(&idx) => {
                    let repeat = observation.with_weight(self.config.weight_delta);
                    let merged = folded[idx].clone().merge(&repeat);
                    folded[idx] = merged;
                }
                None => {
                    slots.insert(observation.key().clone(), folded.len());
                    folded.push(observation);
                }
            }
        }

        folded
    }

    /// Project the buffered events into a new graph.
    ///
    /// Each event tags its actor as `{type: "actor"}` and its subject as
    /// `{type: <event_type>}`, replayed in buffer order so the last
    /// replayed observation decides a node's type.
    pub fn build_graph(&self) -> TemporalGraph {
        let mut graph = TemporalGraph::new();

        for event in &self.events {
            graph.upsert_node(event.actor(), &node_type(ACTOR_NODE_TYPE));
            graph.upsert_node(event.subject(), &node_type(event.event_type()));
        }

        for relationship in self.fold_relationships() {
            graph.upsert_edge(relationship);
        }

        debug!(
            events = self.events.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built temporal graph"
        );
        graph
    }
}

fn node_type(value: &str) -> Attributes {
    Attributes::from([(NODE_TYPE_ATTRIBUTE.to_string(), value.to_string())])
}

fn validate_all(records: impl IntoIterator<Item = RawEvent>) -> Result<Vec<Event>, LoadError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            Event::validate(raw).map_err(|source| LoadError::Record { index, source })
        })
        .collect()
}

/// Parse a JSON array of event records, failing on the first invalid one.
pub fn parse_events(json: &str) -> Result<Vec<Event>, LoadError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            Event::from_value(value).map_err(|source| LoadError::Record { index, source })
        })
        .collect()
}

/// Read and validate every event record in a JSON file.
pub fn load_events(path: &Path) -> Result<Vec<Event>, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    let events = parse_events(&contents)?;
    debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}
