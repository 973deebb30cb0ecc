//! temporal-kg: Temporal Knowledge Graph Projection
//!
//! Projects a time-ordered stream of events ("actor did X to subject at T")
//! into a temporal knowledge graph of entity nodes joined by typed, weighted,
//! time-bounded relationships.
//!
//! # Core Concepts
//!
//! - **Events**: validated, canonical action records
//! - **Nodes**: entities seen as an actor or a subject
//! - **Relationships**: one edge per `(source, target, type)`; repeat
//!   observations add weight and widen the observed window
//!
//! # Example
//!
//! ```
//! use temporal_kg::{summarize, Attributes, Event, ProjectionEngine};
//! use chrono::{TimeZone, Utc};
//!
//! let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let event = Event::new("service.deployed", at, "atlas", "payments", Attributes::new()).unwrap();
//!
//! let mut engine = ProjectionEngine::new();
//! engine.ingest(vec![event.clone(), event]);
//! let graph = engine.build_graph();
//!
//! assert_eq!(graph.edge_count(), 1);
//! assert_eq!(summarize(&graph, 5).rows()[0].weight, 2.0);
//! ```

pub mod event;
pub mod export;
pub mod fabricate;
mod graph;
pub mod projection;
pub mod summary;

pub use event::{canonicalize, parse_timestamp, Event, RawEvent, ValidationError};
pub use export::{export, write_graph, ExportError, ExportFormat, ExportGraph};
pub use fabricate::{fabricate, write_events, FabricateConfig, FabricateError};
pub use graph::{
    Attributes, EdgeKey, Node, NodeId, Relationship, TemporalGraph, DEFAULT_WEIGHT_DELTA,
};
pub use projection::{
    load_events, parse_events, ConfigError, LoadError, ProjectionConfig, ProjectionEngine,
};
pub use summary::{summarize, Summary, SummaryRow, DEFAULT_TOP_K};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
