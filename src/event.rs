//! Event model: schema-checked input records and validated, canonical events
//!
//! A [`RawEvent`] is whatever the producer sent, with every field optional so
//! that missing fields can be reported precisely. [`Event::validate`] turns it
//! into an immutable [`Event`] or a [`ValidationError`]; nothing partial is
//! ever produced.

use crate::graph::Attributes;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a raw record into an [`Event`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is empty after trimming")]
    EmptyField(&'static str),

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("malformed event record: {0}")]
    Malformed(String),
}

/// An event record exactly as it appears in the input file.
///
/// Field presence is checked by [`Event::validate`], not by deserialization,
/// so an absent field and a field of the wrong type produce distinct errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl RawEvent {
    /// Decode a single JSON record, reporting shape mismatches as
    /// [`ValidationError::Malformed`].
    ///
    /// Only JSON objects are records. serde would otherwise fill the fields
    /// of an array positionally.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::Malformed(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// A validated event. Identifiers are canonical (trimmed, lowercase).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    event_type: String,
    occurred_at: DateTime<Utc>,
    actor: String,
    subject: String,
    attributes: Attributes,
}

impl Event {
    /// Build an event from already-typed parts, canonicalizing identifiers.
    pub fn new(
        event_type: &str,
        occurred_at: DateTime<Utc>,
        actor: &str,
        subject: &str,
        attributes: Attributes,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            event_type: canonical_field("event_type", event_type)?,
            occurred_at,
            actor: canonical_field("actor", actor)?,
            subject: canonical_field("subject", subject)?,
            attributes,
        })
    }

    /// Validate a raw record.
    pub fn validate(raw: RawEvent) -> Result<Self, ValidationError> {
        let event_type = raw.event_type.ok_or(ValidationError::MissingField("event_type"))?;
        let occurred_at = raw.occurred_at.ok_or(ValidationError::MissingField("occurred_at"))?;
        let actor = raw.actor.ok_or(ValidationError::MissingField("actor"))?;
        let subject = raw.subject.ok_or(ValidationError::MissingField("subject"))?;

        Self::new(
            &event_type,
            parse_timestamp(&occurred_at)?,
            &actor,
            &subject,
            raw.attributes.unwrap_or_default(),
        )
    }

    /// Validate a JSON record in one step.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        Self::validate(RawEvent::from_value(value)?)
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Trim surrounding whitespace and lowercase. Idempotent.
pub fn canonicalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn canonical_field(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let canonical = canonicalize(value);
    if canonical.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(canonical)
}

/// Parse an ISO-8601 date-time.
///
/// Offsets are normalized to UTC; a date-time without an offset is taken to
/// be UTC already.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| ValidationError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
