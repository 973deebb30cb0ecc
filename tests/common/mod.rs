//! Common test utilities for projection scenarios
//!
//! Shared event fixtures and file helpers for the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use temporal_kg::{parse_timestamp, Attributes, Event};

/// Build a validated event; `at` is an RFC 3339 timestamp.
pub fn event(kind: &str, at: &str, actor: &str, subject: &str) -> Event {
    Event::new(kind, ts(at), actor, subject, Attributes::new()).expect("fixture event is valid")
}

pub fn ts(at: &str) -> DateTime<Utc> {
    parse_timestamp(at).expect("fixture timestamp is valid")
}

/// The three-event deployment scenario as raw JSON records
pub fn deployment_records() -> Value {
    json!([
        {
            "event_type": "service.deployed",
            "occurred_at": "2024-01-01T00:00:00Z",
            "actor": "atlas",
            "subject": "payments",
            "attributes": {"source": "fixture", "run": "0"}
        },
        {
            "event_type": "service.deployed",
            "occurred_at": "2024-01-02T00:00:00Z",
            "actor": "atlas",
            "subject": "payments",
            "attributes": {"source": "fixture", "run": "1"}
        },
        {
            "event_type": "service.scaled",
            "occurred_at": "2024-01-01T12:00:00Z",
            "actor": "apollo",
            "subject": "payments",
            "attributes": {"source": "fixture", "run": "2"}
        }
    ])
}

/// Write a JSON document into `dir` and return its path.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).expect("fixture serializes"))
        .expect("fixture file written");
    path
}
