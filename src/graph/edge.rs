//! Relationship (edge) representation with an observed-time window

use super::node::{Attributes, NodeId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Composite identity of a relationship: `(source, target, relationship_type)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
    pub relationship_type: String,
}

impl EdgeKey {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship_type: relationship_type.into(),
        }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.relationship_type, self.target)
    }
}

/// A typed, weighted, time-bounded connection between two nodes.
///
/// Invariants: `first_observed_at <= last_observed_at`, and `weight` never
/// decreases once the relationship exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    #[serde(flatten)]
    key: EdgeKey,
    first_observed_at: DateTime<Utc>,
    last_observed_at: DateTime<Utc>,
    weight: f64,
    context: Attributes,
}

impl Relationship {
    /// A single observation at `observed_at`, weighing 1.0
    pub fn observed(key: EdgeKey, observed_at: DateTime<Utc>) -> Self {
        Self {
            key,
            first_observed_at: observed_at,
            last_observed_at: observed_at,
            weight: 1.0,
            context: Attributes::new(),
        }
    }

    /// A relationship spanning an explicit window. Bounds are reordered if
    /// given backwards.
    pub fn spanning(key: EdgeKey, first: DateTime<Utc>, last: DateTime<Utc>) -> Self {
        Self {
            key,
            first_observed_at: first.min(last),
            last_observed_at: first.max(last),
            weight: 1.0,
            context: Attributes::new(),
        }
    }

    /// Set the starting weight. Negative or non-finite values become 0.0.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = non_negative(weight);
        self
    }

    pub fn with_context(mut self, context: Attributes) -> Self {
        self.context = context;
        self
    }

    pub fn key(&self) -> &EdgeKey {
        &self.key
    }

    pub fn source(&self) -> &NodeId {
        &self.key.source
    }

    pub fn target(&self) -> &NodeId {
        &self.key.target
    }

    pub fn relationship_type(&self) -> &str {
        &self.key.relationship_type
    }

    pub fn first_observed_at(&self) -> DateTime<Utc> {
        self.first_observed_at
    }

    pub fn last_observed_at(&self) -> DateTime<Utc> {
        self.last_observed_at
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn context(&self) -> &Attributes {
        &self.context
    }

    /// Whether `node` is either endpoint
    pub fn touches_node(&self, node: &str) -> bool {
        self.key.source.as_str() == node || self.key.target.as_str() == node
    }

    /// Fold a repeat observation into this relationship in place.
    ///
    /// The window widens to cover `observation`'s window, `weight` grows by
    /// `delta`, and `observation`'s context overwrites same-named keys.
    pub fn touch(&mut self, observation: &Relationship, delta: f64) {
        self.first_observed_at = self.first_observed_at.min(observation.first_observed_at);
        self.last_observed_at = self.last_observed_at.max(observation.last_observed_at);
        self.weight += non_negative(delta);
        for (k, v) in &observation.context {
            self.context.insert(k.clone(), v.clone());
        }
    }

    /// Combine two aggregates of the same key.
    ///
    /// Window and weight are commutative and associative; context is
    /// last-write-wins with `other` written last.
    pub fn merge(mut self, other: &Relationship) -> Self {
        debug_assert_eq!(self.key, other.key, "merging relationships with different keys");
        let delta = other.weight;
        self.touch(other, delta);
        self
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
